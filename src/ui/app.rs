//! Main TUI application state and logic

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use rand::rngs::ThreadRng;
use rand::Rng;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    Frame, Terminal,
};
use rustc_hash::FxHashSet;
use std::io;
use std::time::Duration;

use crate::engine::constants::{
    DEFAULT_MATRIX_DIM, MAX_ELEMENT, MAX_MATRIX_DIM, MAX_SPEED, MIN_ELEMENT, MIN_SPEED,
};
use crate::engine::heap::check_max_heap;
use crate::engine::matrix::{self, Matrix, MatrixRun};
use crate::engine::mst::MstAlgorithm;
use crate::engine::sorting::SortAlgorithm;
use crate::graph::Graph;
use crate::playback::{Player, RunRequest, RunResult};
use crate::step::{Step, StepKind};
use crate::ui::panes::{self, GRAPH_HEIGHT, GRAPH_WIDTH};

/// Which visualizer the app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Sort,
    Heap,
    Matrix,
    Mst,
}

impl Mode {
    pub fn title(self) -> &'static str {
        match self {
            Mode::Sort => "Sorting",
            Mode::Heap => "Heap",
            Mode::Matrix => "Matrix Multiplication",
            Mode::Mst => "Minimum Spanning Tree",
        }
    }
}

/// Startup configuration, already clamped by the caller.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: Mode,
    pub array_size: usize,
    pub speed: u32,
    pub node_count: usize,
    pub matrix_dim: usize,
    pub sort_algorithm: SortAlgorithm,
    pub mst_algorithm: MstAlgorithm,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            mode: Mode::Sort,
            array_size: crate::engine::constants::DEFAULT_ARRAY_SIZE,
            speed: crate::engine::constants::DEFAULT_SPEED,
            node_count: crate::engine::constants::DEFAULT_NODE_COUNT,
            matrix_dim: DEFAULT_MATRIX_DIM,
            sort_algorithm: SortAlgorithm::Bubble,
            mst_algorithm: MstAlgorithm::Prim,
        }
    }
}

/// The main application state
pub struct App {
    mode: Mode,
    player: Player,
    speed: u32,
    rng: ThreadRng,

    /// The array the sort/heap panes display, updated from step snapshots
    values: Vec<i32>,
    array_size: usize,
    sort_algorithm: SortAlgorithm,

    /// Most recent step kind, drives the highlight colors
    last_step: Option<StepKind>,
    /// Indices known to be in final sorted position
    sorted: FxHashSet<usize>,

    heap_comparisons: u64,
    heap_swaps: u64,

    graph: Graph,
    node_count: usize,
    mst_algorithm: MstAlgorithm,
    mst_weight: Option<u32>,

    matrix_a: Matrix,
    matrix_b: Matrix,
    matrix_run: Option<MatrixRun>,

    /// Whether the app should quit
    should_quit: bool,

    /// Status message to display
    status_message: String,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let mut rng = rand::thread_rng();
        let values = random_array(config.array_size, &mut rng);
        let graph = Graph::random(config.node_count, GRAPH_WIDTH, GRAPH_HEIGHT, &mut rng);
        let dim = config.matrix_dim.clamp(1, MAX_MATRIX_DIM);
        let matrix_a = Matrix::random(dim, dim, &mut rng);
        let matrix_b = Matrix::random(dim, dim, &mut rng);

        App {
            mode: config.mode,
            player: Player::new(config.speed),
            speed: config.speed,
            rng,
            values,
            array_size: config.array_size,
            sort_algorithm: config.sort_algorithm,
            last_step: None,
            sorted: FxHashSet::default(),
            heap_comparisons: 0,
            heap_swaps: 0,
            graph,
            node_count: config.node_count,
            mst_algorithm: config.mst_algorithm,
            mst_weight: None,
            matrix_a,
            matrix_b,
            matrix_run: None,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            // Drain any steps the worker produced since the last frame.
            while let Some(step) = self.player.try_step() {
                self.apply_step(step);
            }
            if !self.player.is_running() {
                // The worker has stopped, so the channel holds everything it
                // ever sent; drain the stragglers before adopting the result.
                while let Some(step) = self.player.try_step() {
                    self.apply_step(step);
                }
                if let Some(result) = self.player.finish() {
                    self.apply_result(result);
                }
            }

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Poll with a timeout so playback frames keep flowing.
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Fold one step into the displayed state.
    fn apply_step(&mut self, step: Step) {
        if !step.values.is_empty() {
            self.values = step.values;
        }
        match step.kind {
            StepKind::MarkSorted { index } => {
                self.sorted.insert(index);
            }
            StepKind::EdgeAccept { from, to, weight } => {
                self.graph.mark_mst(from, to);
                self.mst_weight = Some(self.mst_weight.unwrap_or(0) + weight);
            }
            _ => {}
        }
        self.last_step = Some(step.kind);
    }

    /// Adopt the worker's final state once it stops.
    fn apply_result(&mut self, result: RunResult) {
        let cancelled = result.outcome().is_cancelled();
        match result {
            RunResult::Sorted { values, .. } => {
                self.values = values;
                if !cancelled {
                    self.sorted = (0..self.values.len()).collect();
                }
            }
            RunResult::Heap {
                heap,
                comparisons,
                swaps,
                ..
            } => {
                self.values = heap;
                self.heap_comparisons = comparisons;
                self.heap_swaps = swaps;
            }
            RunResult::Mst {
                graph,
                total_weight,
                ..
            } => {
                self.graph = graph;
                self.mst_weight = Some(total_weight);
            }
        }
        self.status_message = if cancelled {
            String::from("Stopped")
        } else {
            String::from("Done")
        };
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        match self.mode {
            Mode::Sort => self.render_sort(frame, pane_area),
            Mode::Heap => self.render_heap(frame, pane_area),
            Mode::Matrix => self.render_matrix(frame, pane_area),
            Mode::Mst => self.render_mst(frame, pane_area),
        }

        panes::render_status_bar(
            frame,
            status_area,
            &self.position_label(),
            &self.status_message,
            self.player.is_running(),
            self.keybind_hint(),
        );
    }

    fn render_sort(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            "{}  {}",
            self.sort_algorithm.name(),
            self.sort_algorithm.complexity()
        );
        panes::render_array_pane(
            frame,
            area,
            &title,
            &self.values,
            self.last_step.as_ref(),
            &self.sorted,
        );
    }

    fn render_heap(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        panes::render_array_pane(
            frame,
            columns[0],
            "Heap Array",
            &self.values,
            self.last_step.as_ref(),
            &self.sorted,
        );
        panes::render_heap_tree_pane(
            frame,
            columns[1],
            &self.values,
            self.last_step.as_ref(),
            &self.sorted,
        );
    }

    fn render_matrix(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(33),
                Constraint::Percentage(34),
            ])
            .split(rows[0]);

        let current = self
            .matrix_run
            .as_ref()
            .and_then(|run| run.history.current());
        let (highlight_a, highlight_b, highlight_c, shown_result) = match current {
            Some(entry) => {
                if let StepKind::CellAccumulate { row, col, term, .. } = entry.step.kind {
                    (
                        Some((row, term)),
                        Some((term, col)),
                        Some((row, col)),
                        Some(&entry.result),
                    )
                } else {
                    (None, None, None, Some(&entry.result))
                }
            }
            None => (None, None, None, None),
        };

        panes::render_matrix_pane(frame, columns[0], "Matrix A", &self.matrix_a, highlight_a);
        panes::render_matrix_pane(frame, columns[1], "Matrix B", &self.matrix_b, highlight_b);
        let zeros = Matrix::zeros(self.matrix_a.rows(), self.matrix_b.cols());
        panes::render_matrix_pane(
            frame,
            columns[2],
            "Result",
            shown_result.unwrap_or(&zeros),
            highlight_c,
        );

        match self.matrix_run.as_ref() {
            Some(run) => panes::render_matrix_info_pane(frame, rows[1], &run.history),
            None => panes::render_info_pane(
                frame,
                rows[1],
                "Information",
                vec![
                    Line::from("No multiplication recorded yet."),
                    Line::from("Press space to multiply."),
                ],
            ),
        }
    }

    fn render_mst(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(5)])
            .split(area);

        panes::render_graph_pane(frame, rows[0], self.mst_algorithm.name(), &self.graph);

        let mut lines = vec![Line::from(format!(
            "Nodes: {}   Edges: {}   Tree edges: {}",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.graph.mst_edge_count()
        ))];
        if let Some(weight) = self.mst_weight {
            lines.push(Line::from(format!("Total weight: {}", weight)));
        }
        panes::render_info_pane(frame, rows[1], "Information", lines);
    }

    fn position_label(&self) -> String {
        match self.mode {
            Mode::Matrix => match self.matrix_run.as_ref() {
                Some(run) if !run.history.is_empty() => {
                    format!(
                        "{} {}/{}",
                        self.mode.title(),
                        run.history.cursor() + 1,
                        run.history.len()
                    )
                }
                _ => self.mode.title().to_string(),
            },
            Mode::Heap => format!(
                "{}  cmp {}  swap {}",
                self.mode.title(),
                self.heap_comparisons,
                self.heap_swaps
            ),
            _ => format!("{}  speed {}", self.mode.title(), self.speed),
        }
    }

    fn keybind_hint(&self) -> &'static str {
        match self.mode {
            Mode::Sort => "space run  a algorithm  g new array  +/- speed  q quit",
            Mode::Heap => "b build  s sort  c check  g new array  +/- speed  q quit",
            Mode::Matrix => "space multiply  arrows step  backspace rewind  g new  q quit",
            Mode::Mst => "space run  a algorithm  g new graph  +/- speed  q quit",
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                if self.player.is_running() {
                    if let Some(result) = self.player.cancel() {
                        self.apply_result(result);
                    }
                }
                self.should_quit = true;
            }
            KeyCode::Char(' ') => match self.mode {
                Mode::Matrix => self.multiply(),
                Mode::Sort => self.start_or_stop(RunRequest::Sort {
                    algorithm: self.sort_algorithm,
                    values: self.values.clone(),
                }),
                Mode::Heap => self.start_or_stop(RunRequest::HeapSort {
                    values: self.values.clone(),
                }),
                Mode::Mst => {
                    self.graph.reset_mst();
                    self.mst_weight = None;
                    self.start_or_stop(RunRequest::FindMst {
                        graph: self.graph.clone(),
                        algorithm: self.mst_algorithm,
                    });
                }
            },
            KeyCode::Char('b') if self.mode == Mode::Heap => {
                self.start_or_stop(RunRequest::BuildMaxHeap {
                    values: self.values.clone(),
                });
            }
            KeyCode::Char('s') if self.mode == Mode::Heap => {
                self.start_or_stop(RunRequest::HeapSort {
                    values: self.values.clone(),
                });
            }
            KeyCode::Char('c') if self.mode == Mode::Heap => {
                self.status_message = if check_max_heap(&self.values) {
                    String::from("Max-heap property holds")
                } else {
                    String::from("Not a max-heap")
                };
            }
            KeyCode::Char('a') => self.cycle_algorithm(),
            KeyCode::Char('g') => self.regenerate(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_speed(10),
            KeyCode::Char('-') => self.adjust_speed(-10),
            KeyCode::Left if self.mode == Mode::Matrix => {
                if let Some(run) = self.matrix_run.as_mut() {
                    run.history.step_backward();
                }
            }
            KeyCode::Right if self.mode == Mode::Matrix => {
                if let Some(run) = self.matrix_run.as_mut() {
                    run.history.step_forward();
                }
            }
            KeyCode::Backspace if self.mode == Mode::Matrix => {
                if let Some(run) = self.matrix_run.as_mut() {
                    run.history.rewind();
                }
            }
            KeyCode::Enter if self.mode == Mode::Matrix => {
                if let Some(run) = self.matrix_run.as_mut() {
                    while run.history.cursor() + 1 < run.history.len() {
                        run.history.step_forward();
                    }
                }
            }
            _ => {}
        }
    }

    /// Space toggles: start a run when idle, cancel the active one otherwise.
    fn start_or_stop(&mut self, request: RunRequest) {
        if self.player.is_running() {
            if let Some(result) = self.player.cancel() {
                self.apply_result(result);
            }
            return;
        }

        self.last_step = None;
        self.sorted.clear();
        match self.player.start(request) {
            Ok(()) => self.status_message = String::from("Running..."),
            Err(e) => self.status_message = e.to_string(),
        }
    }

    fn multiply(&mut self) {
        match matrix::multiply(&self.matrix_a, &self.matrix_b) {
            Ok(run) => {
                self.status_message = format!("Recorded {} steps", run.history.len());
                self.matrix_run = Some(run);
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    fn cycle_algorithm(&mut self) {
        if self.player.is_running() {
            return;
        }
        match self.mode {
            Mode::Sort => {
                let pos = SortAlgorithm::ALL
                    .iter()
                    .position(|&a| a == self.sort_algorithm)
                    .unwrap_or(0);
                self.sort_algorithm = SortAlgorithm::ALL[(pos + 1) % SortAlgorithm::ALL.len()];
                self.status_message = self.sort_algorithm.name().to_string();
            }
            Mode::Mst => {
                self.mst_algorithm = match self.mst_algorithm {
                    MstAlgorithm::Prim => MstAlgorithm::Kruskal,
                    MstAlgorithm::Kruskal => MstAlgorithm::Prim,
                };
                self.status_message = self.mst_algorithm.name().to_string();
            }
            _ => {}
        }
    }

    /// Throw away the current input and generate a fresh one.
    fn regenerate(&mut self) {
        if self.player.is_running() {
            if let Some(result) = self.player.cancel() {
                self.apply_result(result);
            }
        }
        self.last_step = None;
        self.sorted.clear();
        self.heap_comparisons = 0;
        self.heap_swaps = 0;

        match self.mode {
            Mode::Sort | Mode::Heap => {
                self.values = random_array(self.array_size, &mut self.rng);
            }
            Mode::Mst => {
                self.graph =
                    Graph::random(self.node_count, GRAPH_WIDTH, GRAPH_HEIGHT, &mut self.rng);
                self.mst_weight = None;
            }
            Mode::Matrix => {
                let dim = self.matrix_a.rows();
                self.matrix_a = Matrix::random(dim, dim, &mut self.rng);
                self.matrix_b = Matrix::random(dim, dim, &mut self.rng);
                self.matrix_run = None;
            }
        }
        self.status_message = String::from("Generated new input");
    }

    fn adjust_speed(&mut self, delta: i64) {
        let next = i64::from(self.speed) + delta;
        self.speed = next.clamp(i64::from(MIN_SPEED), i64::from(MAX_SPEED)) as u32;
        self.player.set_speed(self.speed);
        self.status_message = format!("Speed {}", self.speed);
    }
}

fn random_array<R: Rng>(size: usize, rng: &mut R) -> Vec<i32> {
    (0..size)
        .map(|_| rng.gen_range(MIN_ELEMENT..=MAX_ELEMENT))
        .collect()
}
