use crate::go::{Color, Point};
use crate::gtp::Analysis;
use crate::sgf::{NodeId, Tree};

/// What the engine thinks of a position in the game.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Record {
    pub node: NodeId,
    /// The color of the move played at this node, if any.
    pub turn: Option<Color>,
    pub best: Option<Point>,
    pub visits: Option<u64>,
    pub pv: Option<Vec<Point>>,
    /// Black's win rate before the move is played.
    pub before: Option<f64>,
    /// Black's win rate after the move is played.
    pub after: Option<f64>,
    /// The record that precedes this one, which isn't necessarily the parent node.
    pub previous: Option<NodeId>,
}

impl Record {
    pub fn new(node: NodeId, turn: Option<Color>, previous: Option<NodeId>) -> Self {
        Record {
            node,
            turn,
            previous,
            ..Record::default()
        }
    }

    /// Collects a record for every node along the main line that places a stone.
    pub fn collect(tree: &Tree) -> Vec<Self> {
        let mut records: Vec<Record> = Vec::new();

        for id in tree.main_line() {
            let node = tree.node(id);
            if !node.is_empty() {
                let previous = records.last().map(|r| r.node);
                records.push(Record::new(id, node.turn(), previous));
            }
        }

        records
    }

    /// Stores the outcome of analyzing the position before the move.
    pub fn assess(&mut self, analysis: Analysis) {
        self.best = analysis.best;
        self.before = analysis.winrate;
        self.visits = analysis.visits;
        self.pv = analysis.pv;
    }

    /// The change in Black's win rate caused by the move, to a hundredth of a percentage point.
    pub fn delta(&self) -> Option<f64> {
        let delta = self.after? - self.before?;
        Some((delta * 100.).round() / 100.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn empty_nodes_are_skipped() {
        let tree: Tree = "(;SZ[9];C[empty];B[ee];AW[cc];W[dd];C[end])".parse().unwrap();
        let records = Record::collect(&tree);
        let nodes: Vec<_> = tree.main_line().collect();

        assert_eq!(records.len(), 3);

        assert_eq!(records[0], Record::new(nodes[2], Some(Color::Black), None));
        assert_eq!(records[1], Record::new(nodes[3], None, Some(nodes[2])));
        assert_eq!(records[2], Record::new(nodes[4], Some(Color::White), Some(nodes[3])));
    }

    #[test]
    fn variations_are_not_collected() {
        let tree: Tree = "(;B[aa](;W[bb])(;W[cc];B[dd]))".parse().unwrap();
        assert_eq!(Record::collect(&tree).len(), 2);
    }

    #[test]
    fn root_setup_is_collected() {
        let tree: Tree = "(;AB[dd][pp];W[dp])".parse().unwrap();
        let records = Record::collect(&tree);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].node, tree.root());
        assert_eq!(records[0].turn, None);
    }

    #[proptest]
    fn assess_stores_analysis(
        #[strategy(..=100u32)] w: u32,
        #[strategy(1u64..)] v: u64,
        best: Option<Point>,
    ) {
        let mut record = Record::default();

        record.assess(Analysis {
            best,
            winrate: Some(f64::from(w)),
            visits: Some(v),
            pv: Some(best.into_iter().collect()),
        });

        assert_eq!(record.best, best);
        assert_eq!(record.before, Some(f64::from(w)));
        assert_eq!(record.visits, Some(v));
        assert_eq!(record.pv, Some(best.into_iter().collect()));
        assert_eq!(record.after, None);
    }

    #[proptest]
    fn delta_requires_both_scores(#[strategy(..=100u32)] a: u32, #[strategy(..=100u32)] b: u32) {
        let (a, b) = (f64::from(a), f64::from(b));
        let mut record = Record::default();
        assert_eq!(record.delta(), None);

        record.before = Some(b);
        assert_eq!(record.delta(), None);

        record.after = Some(a);
        assert_eq!(record.delta(), Some(a - b));

        record.before = None;
        assert_eq!(record.delta(), None);
    }

    #[proptest]
    fn delta_is_exact_to_the_hundredth(
        #[strategy(..=10000u32)] a: u32,
        #[strategy(..=10000u32)] b: u32,
    ) {
        let record = Record {
            before: Some(f64::from(b) / 100.),
            after: Some(f64::from(10000 - a) / 100.),
            ..Record::default()
        };

        let expected = (f64::from(10000 - a) - f64::from(b)) / 100.;
        assert_eq!(record.delta(), Some(expected));
    }
}
