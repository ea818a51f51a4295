use crate::domain::overview::RiskLabel;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarketMoves {
    pub equities_pct: Option<f64>,
    pub dollar_pct: Option<f64>,
    pub ten_year_bps: Option<f64>,
}

fn equities_phrase(v: f64) -> &'static str {
    if v > 0.0 {
        "equities higher"
    } else if v < 0.0 {
        "equities lower"
    } else {
        "equities flat"
    }
}

fn dollar_phrase(v: f64) -> &'static str {
    if v < 0.0 {
        "USD softer"
    } else if v > 0.0 {
        "USD firmer"
    } else {
        "USD steady"
    }
}

fn yields_phrase(v: f64) -> &'static str {
    if v > 0.0 {
        "yields rising"
    } else if v < 0.0 {
        "yields falling"
    } else {
        "yields steady"
    }
}

fn tone(risk: RiskLabel) -> &'static str {
    match risk {
        RiskLabel::RiskOn => " → risk-on tone.",
        RiskLabel::RiskOff => " → risk-off tone.",
        RiskLabel::Neutral => " → balanced tone.",
    }
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn narrative(moves: &MarketMoves, risk: RiskLabel) -> String {
    let defined: Vec<(f64, &'static str)> = [
        moves.equities_pct.map(|v| (v, equities_phrase(v))),
        moves.dollar_pct.map(|v| (v, dollar_phrase(v))),
        moves.ten_year_bps.map(|v| (v, yields_phrase(v))),
    ]
    .into_iter()
    .flatten()
    .filter(|(v, _)| !v.is_nan())
    .collect();

    // Flat moves are dropped beside a real one: +0.5% equities with a flat dollar and flat
    // yields reads "Equities higher → balanced tone.".
    let moved: Vec<&str> = defined
        .iter()
        .filter(|(v, _)| *v != 0.0)
        .map(|(_, p)| *p)
        .collect();
    let parts: Vec<&str> = if moved.is_empty() {
        defined.iter().map(|(_, p)| *p).collect()
    } else {
        moved
    };

    let clause = match parts.as_slice() {
        [] => "mixed markets".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} while {}", rest.join(" and ")),
    };

    format!("{}{}", capitalize(&clause), tone(risk))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_mover_with_quiet_dollar_and_yields() {
        let moves = MarketMoves {
            equities_pct: Some(0.5),
            dollar_pct: Some(0.0),
            ten_year_bps: Some(0.0),
        };
        assert_eq!(
            narrative(&moves, RiskLabel::Neutral),
            "Equities higher → balanced tone."
        );
    }

    #[test]
    fn several_movers_joined_with_while_and() {
        let moves = MarketMoves {
            equities_pct: Some(-1.2),
            dollar_pct: Some(0.3),
            ten_year_bps: Some(-4.0),
        };
        assert_eq!(
            narrative(&moves, RiskLabel::RiskOff),
            "Equities lower while usd firmer and yields falling → risk-off tone."
        );
    }

    #[test]
    fn two_movers() {
        let moves = MarketMoves {
            equities_pct: None,
            dollar_pct: Some(-0.4),
            ten_year_bps: Some(3.0),
        };
        assert_eq!(
            narrative(&moves, RiskLabel::RiskOn),
            "Usd softer while yields rising → risk-on tone."
        );
    }

    #[test]
    fn flat_yields_left_out_beside_two_movers() {
        let moves = MarketMoves {
            equities_pct: Some(0.5),
            dollar_pct: Some(0.2),
            ten_year_bps: Some(0.0),
        };
        assert_eq!(
            narrative(&moves, RiskLabel::Neutral),
            "Equities higher while usd firmer → balanced tone."
        );
    }

    #[test]
    fn nothing_moved_mentions_unchanged_markets() {
        let moves = MarketMoves {
            equities_pct: Some(0.0),
            dollar_pct: None,
            ten_year_bps: Some(0.0),
        };
        assert_eq!(
            narrative(&moves, RiskLabel::Neutral),
            "Equities flat while yields steady → balanced tone."
        );
    }

    #[test]
    fn no_defined_move_is_mixed_markets() {
        assert_eq!(
            narrative(&MarketMoves::default(), RiskLabel::Neutral),
            "Mixed markets → balanced tone."
        );
        let nan = MarketMoves {
            equities_pct: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(
            narrative(&nan, RiskLabel::RiskOn),
            "Mixed markets → risk-on tone."
        );
    }

    #[test]
    fn capitalize_lowers_the_tail() {
        assert_eq!(capitalize("equities"), "Equities");
        assert_eq!(capitalize("fx"), "Fx");
        assert_eq!(capitalize("USD softer"), "Usd softer");
        assert_eq!(capitalize(""), "");
    }
}
