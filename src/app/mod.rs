use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::kg::{KnowledgeGraph, NodeType, load_snapshot};

mod graph;
mod highlight;
mod physics;
mod render_utils;
mod ui;

use highlight::HighlightState;

pub struct EntityAtlasApp {
    snapshot_path: PathBuf,
    initial_min_confidence: u8,
    state: AppState,
    reload_rx: Option<Receiver<Result<KnowledgeGraph, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<KnowledgeGraph, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

/// Per-instance view state. Every mounted visualization owns its own working
/// copy and highlight table; nothing here is shared across instances.
struct ViewModel {
    graph: KnowledgeGraph,
    min_confidence: u8,
    max_nodes: usize,
    search: String,
    path_input: String,
    selected: Option<u64>,
    hovered: Option<u64>,
    pan: Vec2,
    zoom: f32,
    highlight: HighlightState,
    graph_dirty: bool,
    graph_cache: Option<RenderGraph>,
    layout_bounds: Vec2,
    top_confidence: Vec<u64>,
    top_degree: Vec<u64>,
    show_fps_bar: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

/// Working copy of the graph for one layout run. Canonical nodes never carry
/// positions; runtime position/velocity state is attached here and re-created
/// on every node-set change.
struct RenderGraph {
    nodes: Vec<RenderNode>,
    edges: Vec<RenderEdge>,
    index_by_id: HashMap<u64, usize>,
    phase: LayoutPhase,
}

struct RenderNode {
    id: u64,
    label: String,
    node_type: NodeType,
    confidence: u8,
    world_pos: Vec2,
    velocity: Vec2,
}

struct RenderEdge {
    id: u64,
    source: usize,
    target: usize,
    label: String,
    confidence: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LayoutPhase {
    Idle,
    Simulating(u32),
    Settled,
}

impl RenderGraph {
    fn node_id(&self, index: usize) -> Option<u64> {
        self.nodes.get(index).map(|node| node.id)
    }
}

impl EntityAtlasApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        snapshot_path: PathBuf,
        min_confidence: u8,
    ) -> Self {
        let state = AppState::Loading {
            rx: Self::spawn_load(snapshot_path.clone()),
        };
        Self {
            snapshot_path,
            initial_min_confidence: min_confidence.min(100),
            state,
            reload_rx: None,
        }
    }

    fn ready_state(&self, graph: KnowledgeGraph) -> AppState {
        let mut model = ViewModel::new(graph);
        model.min_confidence = self.initial_min_confidence;
        AppState::Ready(Box::new(model))
    }

    fn spawn_load(snapshot_path: PathBuf) -> Receiver<Result<KnowledgeGraph, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_snapshot(&snapshot_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }
}

enum Transition {
    Loaded(Result<KnowledgeGraph, String>),
    Retry,
}

impl eframe::App for EntityAtlasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(Transition::Loaded(result));
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading knowledge-graph snapshot...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load knowledge-graph snapshot");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Transition::Retry);
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.snapshot_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.snapshot_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(Transition::Loaded(result));
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(Transition::Loaded(Err(
                                "Background load worker disconnected".to_owned(),
                            )));
                        }
                    }
                }
            }
        }

        match transition {
            Some(Transition::Loaded(Ok(graph))) => {
                self.reload_rx = None;
                self.state = self.ready_state(graph);
            }
            Some(Transition::Loaded(Err(error))) => {
                self.reload_rx = None;
                self.state = AppState::Error(error);
            }
            Some(Transition::Retry) => {
                self.reload_rx = None;
                self.state = AppState::Loading {
                    rx: Self::spawn_load(self.snapshot_path.clone()),
                };
            }
            None => {}
        }
    }
}
