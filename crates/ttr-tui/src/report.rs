use ttr_core::{Tournament, TournamentReport};

/// `ttr-tui calc`: rate the event and print the result to stdout.
pub fn run(tournament: &Tournament, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let report = tournament.evaluate();
    tracing::info!(
        matches = report.matches.len(),
        delta = report.update.delta,
        "evaluated tournament"
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}

pub fn render_text(report: &TournamentReport) -> String {
    let mut out = format!(
        "Current TTR:      {}\n\
         Change constant:  {}\n\
         Result:           {} won, {:.3} expected\n\
         New TTR:          {} ({:+})\n",
        report.current_rating,
        report.change_constant,
        report.actual_result,
        report.expected_result,
        report.update.new_rating,
        report.update.delta,
    );

    for m in &report.matches {
        out.push_str(&format!(
            "  Match {:>2}  {}  vs {:>4} (diff {:+})  p={:.3}  alone: {} ({:+})\n",
            m.index + 1,
            if m.won { "won " } else { "lost" },
            m.opponent_rating,
            m.rating_difference,
            m.win_probability,
            m.single_match.new_rating,
            m.single_match.delta,
        ));
    }
    out
}
