use super::{Figure, Tick, Trace, TraceKind};

/// Returns the figures shipped with the game.
#[must_use]
pub fn builtin_figures() -> Vec<Figure> {
    vec![
        Figure {
            title: "Business Account Origination Fee".to_owned(),
            x_label: "Bank".to_owned(),
            y_label: "DKK".to_owned(),
            x_ticks: vec![
                Tick::new("Danske Bank", 0.0),
                Tick::new("Sydbank", 1.0),
                Tick::new("Nordea", 2.0),
                Tick::new("Vestjysk Bank", 3.0),
                Tick::new("Lunar", 4.0),
            ],
            y_ticks: vec![
                Tick::new("0", 0.0),
                Tick::new("2500", 2500.0),
                Tick::new("5000", 5000.0),
            ],
            trace: Trace {
                kind: TraceKind::Bar,
                x: vec![0.0, 1.0, 2.0, 3.0, 4.0],
                y: vec![4000.0, 3895.0, 4800.0, 5000.0, 0.0],
                colors: vec![],
            },
        },
        Figure {
            title: "Organic Knowledge of Lunar Bank (Voxmeter)".to_owned(),
            x_label: "Time".to_owned(),
            y_label: "Percentage of Questioned (%)".to_owned(),
            x_ticks: vec![
                Tick::new("Juni '21", 0.0),
                Tick::new("Sep '21", 1.0),
                Tick::new("Dec '21", 2.0),
                Tick::new("Mar '22", 3.0),
            ],
            y_ticks: (1..=4)
                .map(|p| Tick::new(format!("{p}%"), f64::from(p)))
                .collect(),
            trace: Trace {
                kind: TraceKind::Line,
                x: vec![0.0, 1.0, 2.0, 3.0],
                y: vec![1.2, 1.75, 2.25, 3.5],
                colors: vec![],
            },
        },
        Figure {
            title: "Win Record in Dano-Swedish Wars since 1523".to_owned(),
            x_label: "Country".to_owned(),
            y_label: "Count".to_owned(),
            x_ticks: vec![Tick::new("Denmark", 0.0), Tick::new("Sweden", 1.0)],
            y_ticks: (0..12)
                .map(|n| Tick::new(n.to_string(), f64::from(n)))
                .collect(),
            trace: Trace {
                kind: TraceKind::Bar,
                x: vec![0.0, 1.0],
                y: vec![7.0, 11.0],
                colors: vec![[200, 16, 46], [0, 106, 167]],
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_figures_are_consistent() {
        let figures = builtin_figures();
        assert_eq!(figures.len(), 3);
        for figure in &figures {
            assert_eq!(figure.trace.x.len(), figure.trace.y.len());
            assert!(figure.trace.colors.is_empty() || figure.trace.colors.len() == figure.trace.x.len());
            assert!(!figure.x_ticks.is_empty());
            assert!(!figure.y_ticks.is_empty());
        }
        assert_eq!(figures[2].y_ticks.len(), 12);
        assert_eq!(figures[1].y_ticks[3].label, "4%");
    }

    #[test]
    fn test_figures_roundtrip_through_json() {
        let figures = builtin_figures();
        let json = serde_json::to_string(&figures).unwrap();
        let parsed: Vec<Figure> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, figures);
    }

    #[test]
    fn test_colors_are_optional_in_json() {
        let json = r#"{
            "title": "t", "x_label": "x", "y_label": "y",
            "x_ticks": [{"label": "a", "position": 0.0}],
            "y_ticks": [],
            "trace": {"kind": "line", "x": [0.0], "y": [1.0]}
        }"#;
        let figure: Figure = serde_json::from_str(json).unwrap();
        assert_eq!(figure.trace.kind, TraceKind::Line);
        assert!(figure.trace.colors.is_empty());
    }
}
