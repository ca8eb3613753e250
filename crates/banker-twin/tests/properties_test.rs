//! Property Tests - Safety, Determinism and Trace Laws
//!
//! Random well-formed snapshots (max = allocation + need, so need is never
//! negative) checked against the laws every run must obey.

use banker_twin::domain::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Snapshot {
    allocation: Matrix,
    max: Matrix,
    available: ResourceVector,
}

impl Snapshot {
    fn input(&self) -> SimulationInput {
        SimulationInput::new(self.available.clone(), self.allocation.clone(), self.max.clone())
    }

    fn capacity(&self) -> ResourceVector {
        let mut total = self.available.clone();
        for row in &self.allocation {
            for (slot, held) in total.iter_mut().zip(row) {
                *slot += held;
            }
        }
        total
    }
}

fn snapshot_strategy() -> impl Strategy<Value = Snapshot> {
    (0usize..7, 1usize..4).prop_flat_map(|(processes, resources)| {
        let row = move |hi: u32| prop::collection::vec(0..hi, resources);
        (
            prop::collection::vec(row(5), processes),
            prop::collection::vec(row(7), processes),
            row(9),
        )
            .prop_map(|(allocation, extra, available)| {
                let max = allocation
                    .iter()
                    .zip(&extra)
                    .map(|(held, more)| held.iter().zip(more).map(|(h, m)| h + m).collect())
                    .collect();
                Snapshot {
                    allocation,
                    max,
                    available,
                }
            })
    })
}

fn schedule_strategy(resources: usize) -> impl Strategy<Value = ArrivalSchedule> {
    prop::collection::btree_map(
        0u64..6,
        prop::collection::vec(prop::collection::vec(0u32..10, resources), 1..3),
        0..4,
    )
}

fn snapshot_with_schedule() -> impl Strategy<Value = (Snapshot, ArrivalSchedule)> {
    snapshot_strategy().prop_flat_map(|snapshot| {
        let resources = snapshot.available.len();
        (Just(snapshot), schedule_strategy(resources))
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn need_is_max_minus_allocation(snapshot in snapshot_strategy()) {
        let need = compute_need(&snapshot.allocation, &snapshot.max).unwrap();
        for (i, row) in need.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                prop_assert_eq!(*cell, snapshot.max[i][j] - snapshot.allocation[i][j]);
            }
        }
    }

    #[test]
    fn safe_sequences_replay(snapshot in snapshot_strategy()) {
        let sequence =
            check_safety(&snapshot.allocation, &snapshot.max, &snapshot.available).unwrap();
        if let Some(sequence) = sequence {
            let work = verify_safe_sequence(
                &snapshot.allocation,
                &snapshot.max,
                &snapshot.available,
                &sequence,
            );
            prop_assert_eq!(work, Ok(snapshot.capacity()));
        }
    }

    #[test]
    fn standard_runs_are_deterministic(snapshot in snapshot_strategy()) {
        let simulator = Simulator::default();
        let first = simulator.run_standard(&snapshot.input()).unwrap();
        let second = simulator.run_standard(&snapshot.input()).unwrap();

        prop_assert_eq!(first.outcome(), second.outcome());
        prop_assert_eq!(first.steps(), second.steps());
        prop_assert_eq!(first.metrics().total_iterations, second.metrics().total_iterations);
    }

    #[test]
    fn comparisons_count_every_test(snapshot in snapshot_strategy()) {
        let session = Simulator::default().run_standard(&snapshot.input()).unwrap();
        let processes = snapshot.allocation.len() as u64;
        let resources = snapshot.available.len() as u64;
        let mut finished = 0u64;
        let mut expected = 0u64;

        // Every unfinished process is tested once per pass
        for step in session.steps() {
            if let StepTag::Snapshot { .. } = step.tag {
                expected += (processes - finished) * resources;
            } else if step.executed.is_some() {
                finished += 1;
            }
            prop_assert!(step.comparisons_so_far <= expected);
        }
        prop_assert_eq!(session.metrics().total_comparisons, expected);
    }

    #[test]
    fn standard_trace_is_continuous(snapshot in snapshot_strategy()) {
        let session = Simulator::default().run_standard(&snapshot.input()).unwrap();
        prop_assert!(check_trace(session.steps()).is_ok());
    }

    #[test]
    fn dynamic_available_never_decreases((snapshot, schedule) in snapshot_with_schedule()) {
        let mut arrivals = ScheduledArrivals::new(schedule);
        let session = Simulator::default()
            .run_dynamic(&snapshot.input(), &mut arrivals)
            .unwrap();

        let history: Vec<&[u32]> = session.available_history().collect();
        for pair in history.windows(2) {
            prop_assert!(pair[0].iter().zip(pair[1]).all(|(before, after)| before <= after));
        }
        prop_assert!(check_trace(session.steps()).is_ok());
    }

    #[test]
    fn dynamic_comparisons_count_every_test((snapshot, schedule) in snapshot_with_schedule()) {
        let mut arrivals = ScheduledArrivals::new(schedule);
        let session = Simulator::default()
            .run_dynamic(&snapshot.input(), &mut arrivals)
            .unwrap();
        let resources = snapshot.available.len() as u64;
        let mut finished = 0u64;
        let mut expected = 0u64;

        // Admitted processes count from the pass that follows their arrival
        for step in session.steps() {
            if let StepTag::Snapshot { .. } = step.tag {
                expected += (step.num_processes() as u64 - finished) * resources;
            } else if step.executed.is_some() {
                finished += 1;
            }
            prop_assert!(step.comparisons_so_far <= expected);
        }
        prop_assert_eq!(session.metrics().total_comparisons, expected);
    }

    #[test]
    fn dynamic_runs_are_deterministic((snapshot, schedule) in snapshot_with_schedule()) {
        let simulator = Simulator::default();
        let first = simulator
            .run_dynamic(&snapshot.input(), &mut ScheduledArrivals::new(schedule.clone()))
            .unwrap();
        let second = simulator
            .run_dynamic(&snapshot.input(), &mut ScheduledArrivals::new(schedule))
            .unwrap();

        prop_assert_eq!(first.outcome(), second.outcome());
        prop_assert_eq!(first.metrics().total_comparisons, second.metrics().total_comparisons);
        prop_assert_eq!(first.metrics().total_iterations, second.metrics().total_iterations);
    }

    #[test]
    fn dynamic_without_arrivals_agrees_with_standard(snapshot in snapshot_strategy()) {
        let simulator = Simulator::default();
        let standard = simulator.run_standard(&snapshot.input()).unwrap();
        let dynamic = simulator.run_dynamic(&snapshot.input(), &mut NoArrivals).unwrap();

        prop_assert_eq!(standard.is_safe(), dynamic.is_safe());
        prop_assert_eq!(standard.safe_sequence(), dynamic.safe_sequence());
    }

    #[test]
    fn parser_never_panics(text in ".{0,64}") {
        let _ = parse_schedule(&text);
    }
}
