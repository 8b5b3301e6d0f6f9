//! Stateless render functions for the visualizer panes.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Bar, BarChart, BarGroup, Block, Borders, Paragraph,
    },
    Frame,
};
use rustc_hash::FxHashSet;

use crate::engine::matrix::{Matrix, StepHistory};
use crate::graph::Graph;
use crate::step::StepKind;
use crate::ui::theme::DEFAULT_THEME;

/// Logical canvas size the graph generator and renderer agree on
pub const GRAPH_WIDTH: f64 = 800.0;
pub const GRAPH_HEIGHT: f64 = 600.0;

fn pane_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.comment))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(DEFAULT_THEME.fg)
                .add_modifier(Modifier::BOLD),
        ))
}

/// Color for one bar given the most recent event and the sorted tail.
fn bar_color(index: usize, last: Option<&StepKind>, sorted: &FxHashSet<usize>) -> Color {
    if sorted.contains(&index) {
        return DEFAULT_THEME.success;
    }
    match last {
        Some(StepKind::Compare { lhs, rhs }) if index == *lhs || index == *rhs => {
            DEFAULT_THEME.secondary
        }
        Some(StepKind::Swap { lhs, rhs }) if index == *lhs || index == *rhs => DEFAULT_THEME.error,
        Some(StepKind::Set { index: i, .. }) if index == *i => DEFAULT_THEME.error,
        Some(StepKind::HeapifyVisit { index: i }) if index == *i => DEFAULT_THEME.accent,
        Some(StepKind::PartitionDone { pivot, .. }) if index == *pivot => DEFAULT_THEME.error,
        Some(StepKind::MarkSorted { index: i }) if index == *i => DEFAULT_THEME.success,
        _ => DEFAULT_THEME.primary,
    }
}

/// Render the working array as a bar chart, one bar per element.
pub fn render_array_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    values: &[i32],
    last: Option<&StepKind>,
    sorted: &FxHashSet<usize>,
) {
    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            Bar::default()
                .value(v.max(0) as u64)
                .style(Style::default().fg(bar_color(i, last, sorted)))
                .text_value(String::new())
        })
        .collect();

    let chart = BarChart::default()
        .block(pane_block(title))
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Render the heap as a centered level-per-line tree. Children of index i
/// live at 2i+1 and 2i+2, so level l spans indices 2^l - 1 .. 2^(l+1) - 1.
pub fn render_heap_tree_pane(
    frame: &mut Frame,
    area: Rect,
    heap: &[i32],
    last: Option<&StepKind>,
    sorted: &FxHashSet<usize>,
) {
    let mut lines: Vec<Line> = Vec::new();

    let mut level_start = 0usize;
    let mut level_len = 1usize;
    while level_start < heap.len() {
        let mut spans: Vec<Span> = Vec::new();
        for (offset, &value) in heap
            .iter()
            .skip(level_start)
            .take(level_len)
            .enumerate()
        {
            let index = level_start + offset;
            let color = if index == 0 && !sorted.contains(&0) {
                DEFAULT_THEME.root
            } else {
                bar_color(index, last, sorted)
            };
            spans.push(Span::styled(
                format!("{:^6}", value),
                Style::default().fg(color),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
        level_start += level_len;
        level_len *= 2;
    }

    let paragraph = Paragraph::new(lines)
        .block(pane_block("Heap Tree"))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render one matrix as a grid of right-aligned cells, optionally
/// highlighting a single cell.
pub fn render_matrix_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    matrix: &Matrix,
    highlight: Option<(usize, usize)>,
) {
    let mut lines: Vec<Line> = Vec::new();
    for row in 0..matrix.rows() {
        let mut spans: Vec<Span> = Vec::new();
        for col in 0..matrix.cols() {
            let style = if highlight == Some((row, col)) {
                Style::default()
                    .fg(DEFAULT_THEME.success)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            spans.push(Span::styled(format!("{:>6}", matrix.get(row, col)), style));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines)
        .block(pane_block(title))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render the multiplication step detail for the entry under the cursor.
pub fn render_matrix_info_pane(frame: &mut Frame, area: Rect, history: &StepHistory) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(entry) = history.current() {
        if let StepKind::CellAccumulate {
            row,
            col,
            term,
            a_value,
            b_value,
            partial_sum,
        } = entry.step.kind
        {
            lines.push(Line::from(format!(
                "Step {}/{}",
                history.cursor() + 1,
                history.len()
            )));
            lines.push(Line::from(format!(
                "Calculating cell [{},{}]",
                row + 1,
                col + 1
            )));
            lines.push(Line::from(format!(
                "A[{},{}] = {}  x  B[{},{}] = {}",
                row + 1,
                term + 1,
                a_value,
                term + 1,
                col + 1,
                b_value
            )));
            lines.push(Line::from(Span::styled(
                format!("Partial sum: {}", partial_sum),
                Style::default().fg(DEFAULT_THEME.success),
            )));
        }
    } else {
        lines.push(Line::from("No multiplication recorded yet."));
        lines.push(Line::from("Press space to multiply."));
    }

    let paragraph = Paragraph::new(lines).block(pane_block("Information"));
    frame.render_widget(paragraph, area);
}

/// Render the graph on a braille canvas: grey edges, green MST edges,
/// labelled circular nodes.
pub fn render_graph_pane(frame: &mut Frame, area: Rect, title: &str, graph: &Graph) {
    let canvas = Canvas::default()
        .block(pane_block(title))
        .x_bounds([0.0, GRAPH_WIDTH])
        .y_bounds([0.0, GRAPH_HEIGHT])
        .paint(|ctx| {
            for edge in graph.edges() {
                let from = &graph.nodes()[edge.from];
                let to = &graph.nodes()[edge.to];
                let color = if edge.in_mst {
                    DEFAULT_THEME.success
                } else {
                    DEFAULT_THEME.comment
                };
                ctx.draw(&CanvasLine {
                    x1: from.x,
                    y1: GRAPH_HEIGHT - from.y,
                    x2: to.x,
                    y2: GRAPH_HEIGHT - to.y,
                    color,
                });
                let mid_x = (from.x + to.x) / 2.0;
                let mid_y = GRAPH_HEIGHT - (from.y + to.y) / 2.0;
                ctx.print(
                    mid_x,
                    mid_y,
                    Line::from(Span::styled(
                        edge.weight.to_string(),
                        Style::default().fg(color),
                    )),
                );
            }

            for node in graph.nodes() {
                ctx.draw(&Circle {
                    x: node.x,
                    y: GRAPH_HEIGHT - node.y,
                    radius: 12.0,
                    color: DEFAULT_THEME.primary,
                });
                ctx.print(
                    node.x,
                    GRAPH_HEIGHT - node.y,
                    Line::from(Span::styled(
                        node.label.clone(),
                        Style::default()
                            .fg(DEFAULT_THEME.fg)
                            .add_modifier(Modifier::BOLD),
                    )),
                );
            }
        });

    frame.render_widget(canvas, area);
}

/// Render a small free-form info pane.
pub fn render_info_pane(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let paragraph = Paragraph::new(lines).block(pane_block(title));
    frame.render_widget(paragraph, area);
}

/// Render the bottom status bar: position and message left, keybinds right.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    position: &str,
    message: &str,
    is_playing: bool,
    keybinds: &str,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left_spans = vec![
        Span::styled(
            format!(" {} ", position),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];
    let left = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left, layout[0]);

    let mut right_spans = vec![Span::styled(
        format!(" {} ", keybinds),
        Style::default()
            .bg(DEFAULT_THEME.status_bg)
            .fg(DEFAULT_THEME.comment),
    )];
    if is_playing {
        right_spans.push(Span::styled(
            " PLAYING ",
            Style::default()
                .bg(DEFAULT_THEME.secondary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let right = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right, layout[1]);
}
