use crate::review::Record;
use crate::sgf::Tree;
use tracing::instrument;

/// Writes what the engine thinks of a move into the game record.
///
/// The evaluation is prepended to the comment, Black's win rate is stored as `SBKV`,
/// the preferred move is marked with `TR` and moves that swing the win rate by more than
/// `hotspot_threshold` are tagged with `HO`. If the engine preferred another move,
/// its principal variation is added as a variation.
#[instrument(level = "debug", skip(tree))]
pub fn annotate(tree: &mut Tree, record: &Record, size: u8, hotspot_threshold: f64) {
    let played = tree.node(record.node).point(size);
    let expected = record.best.is_some() && record.best == played;

    let score = match record.after {
        Some(a) => format!("{a:.2}%"),
        None => "??".into(),
    };

    let delta = match record.delta() {
        Some(d) if expected => format!("( {d:.2}% )"),
        Some(d) => format!("{d:.2}%"),
        None => "??".into(),
    };

    let prefers = match record.best {
        Some(b) if !expected => format!("LZ prefers {}", b.to_vertex(size)),
        _ => String::new(),
    };

    let visits = match record.visits {
        Some(v) => format!("Visits: {v}"),
        None => String::new(),
    };

    let comment = format!("{score}\nDelta: {delta}\n{prefers}\n\n{visits}");

    let node = tree.node_mut(record.node);
    node.prepend_comment(comment.trim());

    if let Some(a) = record.after {
        node.set_value("SBKV", format!("{a:.2}"));
    }

    if record.delta().is_some_and(|d| d.abs() > hotspot_threshold) {
        node.set_value("HO", "1");
    }

    if let Some(b) = record.best {
        node.add_value("TR", b.to_sgf());
    }

    if record.best != played {
        if let (Some(previous), Some(pv)) = (record.previous, &record.pv) {
            let mut color = record.turn;
            let mut parent = previous;
            for &p in pv {
                parent = tree.try_move(parent, p, color.take());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::go::{Color, Point};
    use crate::gtp::Analysis;
    use crate::sgf::NodeId;
    use test_strategy::proptest;

    fn game() -> (Tree, NodeId, NodeId) {
        let tree: Tree = "(;SZ[19];B[pd]C[nice];W[dp])".parse().unwrap();
        let b = tree.main_child(tree.root()).unwrap();
        let w = tree.main_child(b).unwrap();
        (tree, b, w)
    }

    fn vertex(v: &str) -> Option<Point> {
        Point::from_vertex(v, 19)
    }

    #[test]
    fn comment_summarizes_the_evaluation() {
        let (mut tree, b, w) = game();

        let record = Record {
            best: vertex("D4"),
            visits: Some(123),
            before: Some(52.5),
            after: Some(47.25),
            ..Record::new(w, Some(Color::White), Some(b))
        };

        annotate(&mut tree, &record, 19, 10.);

        let node = tree.node(w);
        assert_eq!(node.value("C"), Some("47.25%\nDelta: ( -5.25% )\n\n\nVisits: 123"));
        assert_eq!(node.value("SBKV"), Some("47.25"));
        assert_eq!(node.value("TR"), Some("dp"));
        assert!(!node.has("HO"));
    }

    #[test]
    fn previous_comment_is_kept_below() {
        let (mut tree, b, _) = game();
        annotate(&mut tree, &Record::new(b, Some(Color::Black), None), 19, 10.);
        assert_eq!(tree.node(b).value("C"), Some("??\nDelta: ??\n\nnice"));
        assert!(!tree.node(b).has("SBKV"));
        assert!(!tree.node(b).has("TR"));
    }

    #[test]
    fn preferred_move_is_named() {
        let (mut tree, b, w) = game();

        let record = Record {
            best: vertex("Q4"),
            before: Some(50.),
            after: Some(60.),
            ..Record::new(w, Some(Color::White), Some(b))
        };

        annotate(&mut tree, &record, 19, 10.);
        assert_eq!(tree.node(w).value("C"), Some("60.00%\nDelta: 10.00%\nLZ prefers Q4"));
        assert_eq!(tree.node(w).value("TR"), Some("pp"));
    }

    #[proptest]
    fn delta_is_parenthesized_iff_best_move_was_played(
        best: Point,
        #[strategy(..10000u32)] before: u32,
        #[strategy(..10000u32)] after: u32,
    ) {
        let (mut tree, b, w) = game();

        let record = Record {
            best: best.is_on(19).then_some(best),
            before: Some(f64::from(before) / 100.),
            after: Some(f64::from(after) / 100.),
            ..Record::new(w, Some(Color::White), Some(b))
        };

        annotate(&mut tree, &record, 19, 100.);

        let comment = tree.node(w).value("C").unwrap_or_default();
        let parenthesized = comment.contains("Delta: ( ");
        assert_eq!(parenthesized, record.best == vertex("D4"));
    }

    #[test]
    fn hotspots_exceed_the_threshold() {
        for (after, tagged) in [(55., false), (55.01, true), (45., false), (44.99, true)] {
            let (mut tree, b, w) = game();

            let record = Record {
                before: Some(50.),
                after: Some(after),
                ..Record::new(w, Some(Color::White), Some(b))
            };

            annotate(&mut tree, &record, 19, 5.);
            assert_eq!(tree.node(w).has("HO"), tagged, "{after}");
        }
    }

    #[test]
    fn delta_at_the_threshold_is_not_a_hotspot() {
        let (mut tree, b, w) = game();

        let before = Analysis::parse("info move D4 winrate 14 order 0 pv D4", Color::Black, 19);
        let after = Analysis::parse("info move D4 winrate 9486 order 0 pv D4", Color::White, 19);

        let record = Record {
            before: before.winrate,
            after: after.winrate,
            ..Record::new(w, Some(Color::White), Some(b))
        };

        annotate(&mut tree, &record, 19, 5.);
        assert_eq!(tree.node(w).value("C"), Some("5.14%\nDelta: 5.00%"));
        assert!(!tree.node(w).has("HO"));
    }

    #[test]
    fn principal_variation_branches_from_previous_record() {
        let (mut tree, b, w) = game();

        let record = Record {
            best: vertex("Q4"),
            pv: Some(["Q4", "D4", "C3"].iter().filter_map(|v| vertex(v)).collect()),
            ..Record::new(w, Some(Color::White), Some(b))
        };

        annotate(&mut tree, &record, 19, 10.);

        let [main, variation] = tree.children(b) else {
            panic!("expected a variation");
        };

        assert_eq!(*main, w);

        let line: Vec<_> = std::iter::successors(Some(*variation), |&id| tree.main_child(id))
            .map(|id| {
                let node = tree.node(id);
                (node.turn(), node.point(19))
            })
            .collect();

        assert_eq!(
            line,
            [
                (Some(Color::White), vertex("Q4")),
                (Some(Color::Black), vertex("D4")),
                (Some(Color::White), vertex("C3")),
            ]
        );
    }

    #[test]
    fn principal_variation_starting_with_played_move_is_reused() {
        let (mut tree, b, w) = game();

        let record = Record {
            best: vertex("Q4"),
            pv: Some(["D4", "Q4"].iter().filter_map(|v| vertex(v)).collect()),
            ..Record::new(w, Some(Color::White), Some(b))
        };

        annotate(&mut tree, &record, 19, 10.);

        assert_eq!(tree.children(b), [w]);
        assert_eq!(tree.children(w).len(), 1);
    }

    #[test]
    fn principal_variation_is_not_added_without_previous_record() {
        let (mut tree, b, _) = game();

        let record = Record {
            best: vertex("D4"),
            pv: Some(vec![Point::new(3, 15)]),
            ..Record::new(b, Some(Color::Black), None)
        };

        annotate(&mut tree, &record, 19, 10.);
        assert_eq!(tree.children(tree.root()), [b]);
    }
}
