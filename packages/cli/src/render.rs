//! Plain-text rendering of inputs and sessions

use anyhow::Result;
use banker_twin::{compute_need, Outcome, SimulationInput, SimulationSession, StepRecord};

fn header(input: &SimulationInput) -> String {
    if input.resources.is_empty() {
        (0..input.num_resources())
            .map(|j| format!("R{}", j))
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        input.resources.join(" ")
    }
}

fn print_matrix(title: &str, rows: &[Vec<u32>], highlight: Option<usize>) {
    println!("{}", title);
    for (i, row) in rows.iter().enumerate() {
        let marker = if highlight == Some(i) { '*' } else { ' ' };
        let cells: Vec<String> = row.iter().map(|v| format!("{:>3}", v)).collect();
        println!("  {}P{:<3}{}", marker, i, cells.join(" "));
    }
}

/// Input matrices plus the need matrix
pub fn print_input(input: &SimulationInput) -> Result<()> {
    let need = compute_need(&input.allocation, &input.max)?;

    println!("Resources: {}", header(input));
    println!("Available: {:?}", input.available);
    print_matrix("Allocation", &input.allocation, None);
    print_matrix("Max", &input.max, None);
    print_matrix("Need (Max - Allocation)", &need, None);
    Ok(())
}

fn print_step(index: usize, step: &StepRecord) {
    println!("── Step {} · {} ──", index, step.tag);
    if let Some(arrivals) = &step.arrivals {
        println!("Arrivals: {:?}", arrivals);
    }
    if let Some(process) = step.executed {
        println!("Executed: {}", process);
    }
    println!("Comparisons so far: {}", step.comparisons_so_far);

    let executed = step.executed.map(|p| p.index());
    print_matrix("Allocation", &step.allocation, executed);
    print_matrix("Need", &step.need, executed);
    println!("Available: {:?}", step.available);
}

/// Every recorded step, in order
pub fn print_steps(session: &SimulationSession, input: &SimulationInput) {
    println!("Resources: {}", header(input));
    for (index, step) in session.steps().iter().enumerate() {
        print_step(index, step);
    }
    if session.is_truncated() {
        println!("(trace truncated after {} steps)", session.steps().len());
    }
}

fn describe(outcome: &Outcome) -> String {
    let list = |ids: &[banker_twin::ProcessId]| {
        ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(" → ")
    };

    match outcome {
        Outcome::Safe { sequence } => format!("SAFE  {}", list(sequence)),
        Outcome::Unsafe { partial, blocked } => format!(
            "UNSAFE  finished [{}], blocked [{}]",
            list(partial),
            list(blocked)
        ),
        Outcome::Stuck {
            iteration,
            partial,
            blocked,
        } => format!(
            "STUCK at T{}  finished [{}], blocked [{}]",
            iteration,
            list(partial),
            list(blocked)
        ),
    }
}

/// Outcome and metrics of one session
pub fn print_summary(session: &SimulationSession) {
    let metrics = session.metrics();
    println!("Mode:        {}", session.mode());
    println!("Result:      {}", describe(session.outcome()));
    println!("Comparisons: {}", metrics.total_comparisons);
    println!("Iterations:  {}", metrics.total_iterations);
    println!("Elapsed (s): {:.6}", metrics.elapsed_secs());
}

/// Side-by-side metrics of a standard and a dynamic session
pub fn print_comparison(standard: &SimulationSession, dynamic: &SimulationSession) {
    let (s, d) = (standard.metrics(), dynamic.metrics());

    println!("{:<12} {:>12} {:>12}", "metric", "standard", "dynamic");
    println!("{:<12} {:>12} {:>12}", "comparisons", s.total_comparisons, d.total_comparisons);
    println!("{:<12} {:>12} {:>12}", "iterations", s.total_iterations, d.total_iterations);
    println!(
        "{:<12} {:>12.6} {:>12.6}",
        "time_s",
        s.elapsed_secs(),
        d.elapsed_secs()
    );
    println!();
    println!("standard: {}", describe(standard.outcome()));
    println!("dynamic:  {}", describe(dynamic.outcome()));
}
