//! Running case generators through the sequencer.

use crate::init_logging;
use proptest::prelude::*;
use tcgen::*;

struct GraphInput {
    nodes: Integer,
}

impl Case for GraphInput {
    fn generate(&mut self, _case_num: usize, out: &mut Output<'_>) -> Result<()> {
        self.nodes.reset();
        let nodes = out.draw(&mut self.nodes)? as usize;
        let mut tree = Graph::tree(nodes)?.with_weight(Integer::up_to(10)?);
        out.print([nodes]);
        out.emit(&mut tree)
    }
}

fn graph_input() -> GraphInput {
    GraphInput {
        nodes: Integer::range(2, 12).unwrap(),
    }
}

proptest! {
    #[test]
    fn fixed_seed_reproduces_every_case(seed in any::<u64>(), cases in 1usize..8) {
        init_logging();
        let config = Config::default().with_cases(cases).with_seed(seed);
        let first = Sequencer::new(config.clone()).test_cases(&mut graph_input()).unwrap();
        let second = Sequencer::new(config).test_cases(&mut graph_input()).unwrap();
        prop_assert_eq!(first.len(), cases);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn cases_describe_trees(seed in any::<u64>()) {
        let mut sequencer = Sequencer::new(Config::default().with_cases(3).with_seed(seed));
        for case in sequencer.test_cases(&mut graph_input()).unwrap() {
            let mut lines = case.lines();
            let nodes: usize = lines.next().unwrap().parse().unwrap();
            prop_assert_eq!(lines.count(), nodes - 1);
        }
    }
}

#[test]
fn single_case_is_numbered_one() {
    let mut sequencer = Sequencer::new(Config::default().with_seed(5));
    let mut numbers = Vec::new();
    let mut case = |case_num: usize, out: &mut Output<'_>| -> Result<()> {
        numbers.push(case_num);
        out.line("ok");
        Ok(())
    };
    assert_eq!(sequencer.test_case(&mut case).unwrap(), "ok\n");
    assert_eq!(numbers, vec![1]);
}
