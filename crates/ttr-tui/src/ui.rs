use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Block, BorderType, Chart, Dataset, Gauge, GraphType, Paragraph, Row, Table, Tabs,
        Wrap,
    },
    Frame,
};
use ttr_core::{
    probability_curve, rating_change_curve, ChartSeries, MatchBreakdown, TournamentReport,
};

use crate::calculator::{Calculator, Field, Flag, Tab};

const FORM_WIDTH: u16 = 44;

// ── Public entry point ───────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, calc: &Calculator) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(f.area());

    draw_tabs(f, calc, chunks[0]);
    match calc.tab {
        Tab::Calculator => draw_calculator(f, calc, chunks[1]),
        Tab::Explanation => draw_explanation(f, calc, chunks[1]),
    }
    draw_key_hints(f, calc, chunks[2]);
}

fn draw_tabs(f: &mut Frame, calc: &Calculator, area: Rect) {
    let tabs = Tabs::new(Tab::titles())
        .block(
            Block::bordered()
                .title(" TTR Calculator 🏓 ")
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        )
        .select(calc.tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

// ── Calculator tab ───────────────────────────────────────────────────────────

fn draw_calculator(f: &mut Frame, calc: &Calculator, area: Rect) {
    let report = calc.report();

    let columns =
        Layout::horizontal([Constraint::Length(FORM_WIDTH), Constraint::Min(0)]).split(area);
    draw_form(f, calc, &report, columns[0]);

    let right = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Min(0),
    ])
    .split(columns[1]);
    draw_result(f, &report, right[0]);

    match report.matches.get(calc.detail_index) {
        Some(m) => {
            draw_match_detail(f, &report, m, right[1]);
            if calc.show_graphs {
                draw_graphs(f, &report, m, right[2]);
            } else {
                let hidden = Paragraph::new(Line::from(Span::styled(
                    "Graphs hidden, press g to show them",
                    Style::default().fg(Color::DarkGray),
                )))
                .alignment(Alignment::Center);
                f.render_widget(hidden, right[2]);
            }
        }
        None => {
            let empty = Paragraph::new("No matches entered").block(Block::bordered());
            f.render_widget(empty, right[1]);
        }
    }
}

fn form_line(label: String, value: Span<'static>, focused: bool) -> Line<'static> {
    let prefix = if focused { "▸ " } else { "  " };
    let style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!("{}{}", prefix, label), style),
        value,
    ])
}

fn checkbox(checked: bool) -> Span<'static> {
    if checked {
        Span::styled("[x]", Style::default().fg(Color::Green))
    } else {
        Span::styled("[ ]", Style::default().fg(Color::DarkGray))
    }
}

fn rating_value(rating: i32) -> Span<'static> {
    Span::styled(
        format!("{:>5}", rating),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn draw_form(f: &mut Frame, calc: &Calculator, report: &TournamentReport, area: Rect) {
    let focused = calc.focused();
    let mut lines = Vec::new();
    let mut focus_line = 0;

    let mut push = |lines: &mut Vec<Line<'static>>, line: Line<'static>, field: Option<Field>| {
        if field == Some(focused) {
            focus_line = lines.len();
        }
        lines.push(line);
    };

    push(
        &mut lines,
        form_line(
            format!("{:<28}", "Your current TTR"),
            rating_value(calc.tournament.current_rating),
            focused == Field::CurrentRating,
        ),
        Some(Field::CurrentRating),
    );
    push(&mut lines, Line::from(""), None);
    push(
        &mut lines,
        Line::from(vec![
            Span::styled(" Eligibility  ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("change constant {}", report.change_constant),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        None,
    );
    for &flag in Flag::all() {
        let field = Field::Flag(flag);
        push(
            &mut lines,
            form_line(
                format!("{:<34}", flag.label()),
                checkbox(flag.get(&calc.tournament.flags)),
                focused == field,
            ),
            Some(field),
        );
    }

    for (i, m) in calc.tournament.matches.iter().enumerate() {
        push(&mut lines, Line::from(""), None);
        push(
            &mut lines,
            Line::from(Span::styled(
                format!(" Match {}", i + 1),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            None,
        );
        push(
            &mut lines,
            form_line(
                format!("{:<28}", "  Opponent TTR"),
                rating_value(m.opponent_rating),
                focused == Field::Opponent(i),
            ),
            Some(Field::Opponent(i)),
        );
        push(
            &mut lines,
            form_line(
                format!("{:<34}", "  Won"),
                checkbox(m.won),
                focused == Field::Won(i),
            ),
            Some(Field::Won(i)),
        );
    }

    // Keep the focused row on screen once the list outgrows the panel
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (focus_line + 1).saturating_sub(visible) as u16;

    let block = Block::bordered()
        .title(format!(" Input ({} matches) ", calc.match_count()))
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

fn delta_span(delta: i32) -> Span<'static> {
    let color = match delta {
        d if d > 0 => Color::Green,
        d if d < 0 => Color::Red,
        _ => Color::Gray,
    };
    Span::styled(
        format!("({:+})", delta),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn draw_result(f: &mut Frame, report: &TournamentReport, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled(" New TTR score   ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} ", report.update.new_rating),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            delta_span(report.update.delta),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                " Won {} of {}, expected {:.3}",
                report.actual_result,
                report.matches.len(),
                report.expected_result
            ),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!(" Change constant {}", report.change_constant),
            Style::default().fg(Color::Gray),
        )),
    ];

    let block = Block::bordered()
        .title(" Result ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Green));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_match_detail(f: &mut Frame, report: &TournamentReport, m: &MatchBreakdown, area: Rect) {
    let outcome = if m.won { "won 🥇" } else { "lost" };
    let block = Block::bordered()
        .title(format!(
            " Match {} of {} - {} ",
            m.index + 1,
            report.matches.len(),
            outcome
        ))
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(inner);

    let table = Table::new(
        vec![Row::new(vec![
            report.current_rating.to_string(),
            m.opponent_rating.to_string(),
            format!("{:+}", m.rating_difference),
        ])
        .style(Style::default().fg(Color::White))],
        [
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["Your TTR", "Opponent TTR", "Difference"]).style(
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        ),
    );
    f.render_widget(table, rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
        .ratio(m.win_probability.clamp(0.0, 1.0))
        .label(format!("Win expectation {:.3}", m.win_probability));
    f.render_widget(gauge, rows[1]);

    let single = &m.single_match;
    let mut text = Vec::new();
    if report.matches.len() > 1 {
        text.push(Line::from(vec![
            Span::raw("Had this been the only match: "),
            Span::styled(
                format!("{} ", single.new_rating),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            delta_span(single.delta),
        ]));
        text.push(Line::from(Span::styled(
            "Only the combined result of the event counts. It need not equal \
             the sum of the single results.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        text.push(Line::from(vec![
            Span::raw("Your new TTR score: "),
            Span::styled(
                format!("{} ", single.new_rating),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            delta_span(single.delta),
        ]));
    }
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, rows[2]);
}

// ── Graphs ───────────────────────────────────────────────────────────────────

fn draw_graphs(f: &mut Frame, report: &TournamentReport, m: &MatchBreakdown, area: Rect) {
    let halves =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);
    let center = saturate(m.rating_difference);
    let x = m.rating_difference as f64;

    let probability = probability_curve(center);
    draw_series_chart(
        f,
        halves[0],
        " Win expectation ",
        &probability,
        (0.0, 1.0),
        (x, m.win_probability),
    );

    let change = rating_change_curve(center, m.won, report.change_constant);
    let (lo, hi) = change.value_bounds().unwrap_or((0.0, 0.0));
    let (lo, hi) = (lo.min(0.0), hi.max(0.0));
    let bounds = if lo == hi { (lo - 1.0, hi + 1.0) } else { (lo, hi) };
    draw_series_chart(
        f,
        halves[1],
        " TTR change ",
        &change,
        bounds,
        (x, m.single_match.delta as f64),
    );
}

fn saturate(difference: i64) -> i32 {
    difference.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

fn draw_series_chart(
    f: &mut Frame,
    area: Rect,
    title: &str,
    series: &ChartSeries,
    y_bounds: (f64, f64),
    highlight: (f64, f64),
) {
    let points = series.points();
    let marker = [highlight];
    let (x_min, x_max) = match (series.differences.first(), series.differences.last()) {
        (Some(&first), Some(&last)) => (first as f64, last as f64),
        _ => (-400.0, 400.0),
    };

    let datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
        Dataset::default()
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Red))
            .data(&marker),
    ];

    let x_axis = Axis::default()
        .title("TTR difference")
        .style(Style::default().fg(Color::Gray))
        .bounds([x_min, x_max])
        .labels(axis_labels(x_min, x_max, 0));
    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([y_bounds.0, y_bounds.1])
        .labels(axis_labels(y_bounds.0, y_bounds.1, 1));
    let chart = Chart::new(datasets)
        .block(
            Block::bordered()
                .title(title.to_string())
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Blue)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);
    f.render_widget(chart, area);
}

/// Labels for both ends and the midpoint of an axis, truncated toward zero
fn axis_labels(min: f64, max: f64, precision: usize) -> Vec<String> {
    let scale = 10f64.powi(precision as i32);
    [min, (min + max) / 2.0, max]
        .iter()
        // `+ 0.0` turns a truncated -0.0 into 0.0
        .map(|v| format!("{:.*}", precision, (v * scale).trunc() / scale + 0.0))
        .collect()
}

// ── Explanation tab ──────────────────────────────────────────────────────────

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn body(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::White),
    ))
}

fn draw_explanation(f: &mut Frame, calc: &Calculator, area: Rect) {
    let lines = vec![
        heading("What is the TTR score?"),
        body(
            "TTR stands for table tennis rating, a measure of a player's playing \
             strength. Only singles count, doubles do not. Every officially rated \
             single is worth the same, whatever the event.",
        ),
        Line::from(""),
        heading("Formula"),
        Line::from(Span::styled(
            "  new TTR = old TTR + round((result - expected result) * change constant)",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Result"),
        body("Number of singles won in the event. A win counts 1, a loss 0."),
        Line::from(""),
        heading("Expected result"),
        body(
            "Sum of the win probabilities of all singles in the event. Each one \
             depends only on the rating difference: 1 / (1 + 10^((opponent - you) / 150)).",
        ),
        Line::from(""),
        heading("Change constant"),
        body(
            "How far a single match can move the score at most. The base value is \
             16; each of the four eligibility criteria adds 4, up to 32.",
        ),
        Line::from(""),
        heading("Further reading"),
        body(
            "The official description of the ranking is published by the German \
             table tennis federation (DTTB) as \"Beschreibung der andro-Rangliste\".",
        ),
    ];

    let block = Block::bordered()
        .title(" Explanation ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((calc.explanation_scroll, 0));
    f.render_widget(paragraph, area);
}

// ── Key hints (bottom status bar) ────────────────────────────────────────────

fn draw_key_hints(f: &mut Frame, calc: &Calculator, area: Rect) {
    if let Some(ref status) = calc.status {
        let line = Line::from(Span::styled(
            format!(" {}", status),
            Style::default().fg(Color::Red),
        ));
        f.render_widget(Paragraph::new(line), area);
        return;
    }

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let desc = |d: &'static str| Span::styled(d, Style::default().fg(Color::Gray));
    let hints = match calc.tab {
        Tab::Calculator => Line::from(vec![
            key(" ↑↓"),
            desc(" Select  "),
            key("0-9 ←→"),
            desc(" Rating  "),
            key("Space"),
            desc(" Toggle  "),
            key("a/d"),
            desc(" Add/remove match  "),
            key("[ ]"),
            desc(" Details  "),
            key("g"),
            desc(" Graphs  "),
            key("Tab"),
            desc(" Explanation  "),
            key("q"),
            desc(" Quit"),
        ]),
        Tab::Explanation => Line::from(vec![
            key(" ↑↓"),
            desc(" Scroll  "),
            key("Tab"),
            desc(" Calculator  "),
            key("q"),
            desc(" Quit"),
        ]),
    };
    f.render_widget(Paragraph::new(hints), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(calc: &Calculator) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 48)).unwrap();
        terminal.draw(|f| draw(f, calc)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn calculator_shows_result() {
        let calc = Calculator::new(&Config::default());
        let screen = render(&calc);
        assert!(screen.contains("New TTR score"));
        assert!(screen.contains("1408"));
        assert!(screen.contains("Win expectation 0.500"));
    }

    #[test]
    fn many_matches_still_render() {
        let mut calc = Calculator::new(&Config::default());
        for _ in 0..14 {
            calc.add_match();
        }
        calc.move_focus(-1);
        let screen = render(&calc);
        assert!(screen.contains("Match 15"));
        assert!(screen.contains("Had this been the only match"));
    }

    #[test]
    fn extended_window_labels_its_midpoint() {
        assert_eq!(axis_labels(-400.0, 399.0, 0), vec!["-400", "0", "399"]);
        assert_eq!(axis_labels(-400.0, 2000.0, 0), vec!["-400", "800", "2000"]);
        assert_eq!(axis_labels(-16.0, 0.0, 1), vec!["-16.0", "-8.0", "0.0"]);
    }

    #[test]
    fn explanation_tab_renders() {
        let mut calc = Calculator::new(&Config::default());
        calc.tab = Tab::Explanation;
        let screen = render(&calc);
        assert!(screen.contains("Change constant"));
    }
}
