use crate::{DraftSession, Phase, Side};

/// Renders a one-glance text summary of a session, for reports and logs.
pub fn render_session(session: &DraftSession) -> String {
    let headline = match (session.phase(), session.current_side()) {
        (Phase::AllyBans, _) | (Phase::EnemyBans, _) => {
            format!("banning ({} to act)", session.current_side().unwrap())
        }
        (Phase::AskFirstPick, _) => "waiting for the first pick decision".to_string(),
        (Phase::Pick, Some(side)) => format!("picking ({} to act)", side),
        (Phase::Complete, _) => "draft complete".to_string(),
        (Phase::Pick, None) => unreachable!(),
    };

    let rows = [
        ("bans  ally ", session.bans(Side::Ally)),
        ("bans  enemy", session.bans(Side::Enemy)),
        ("picks ally ", session.picks(Side::Ally)),
        ("picks enemy", session.picks(Side::Enemy)),
    ];
    let width = rows
        .iter()
        .map(|(_, names)| names.join(", ").len())
        .max()
        .unwrap_or(0)
        .max(headline.len());

    let mut result = format!("╭─{}─╮\n", "─".repeat(width + 14));
    result += &format!("│ {:w$} │\n", headline, w = width + 14);
    for (label, names) in rows {
        result += &format!("│ {} │ {:w$} │\n", label, names.join(", "), w = width);
    }
    result += &format!("╰─{}─╯", "─".repeat(width + 14));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_every_side() {
        let mut session = DraftSession::new();
        for name in ["a1", "a2", "a3", "e1", "e2", "e3"] {
            session.select(name).unwrap();
        }
        session.commit_first_pick(Side::Ally).unwrap();
        session.select("p1").unwrap();

        let summary = render_session(&session);
        assert!(summary.contains("picking (enemy to act)"), "{}", summary);
        assert!(summary.contains("a1, a2, a3"), "{}", summary);
        assert!(summary.contains("e1, e2, e3"), "{}", summary);
        assert!(summary.contains("p1"), "{}", summary);
        // Every line of the box is equally wide.
        let widths: Vec<usize> = summary
            .lines()
            .map(|l| l.chars().count())
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{}", summary);
    }

    #[test]
    fn fresh_session_headline() {
        let summary = render_session(&DraftSession::new());
        assert!(summary.contains("banning (ally to act)"), "{}", summary);
    }
}
