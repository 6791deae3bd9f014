use tabq_mdp::{
    DDist, Mdp, MdpSimulator, SolverConfig, TabularQ, epsilon_greedy, greedy, q_em, value,
    value_iteration_with_hook,
};

const WIDTH: i32 = 4;
const HEIGHT: i32 = 3;
const GOAL: (i32, i32) = (3, 2);
const PIT: (i32, i32) = (3, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Move {
    North,
    South,
    East,
    West,
}

impl Move {
    const ALL: [Move; 4] = [Move::North, Move::South, Move::East, Move::West];

    fn offset(self) -> (i32, i32) {
        match self {
            Move::North => (0, 1),
            Move::South => (0, -1),
            Move::East => (1, 0),
            Move::West => (-1, 0),
        }
    }
}

fn shift(cell: (i32, i32), mv: Move) -> (i32, i32) {
    let (dx, dy) = mv.offset();
    (
        (cell.0 + dx).clamp(0, WIDTH - 1),
        (cell.1 + dy).clamp(0, HEIGHT - 1),
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cells: Vec<(i32, i32)> = (0..HEIGHT)
        .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
        .collect();

    // Intended move with probability 0.8, otherwise the agent stays put.
    let mdp = Mdp::new(
        cells.clone(),
        Move::ALL,
        |cell: &(i32, i32), mv: &Move| {
            if *cell == GOAL || *cell == PIT {
                return DDist::delta(*cell);
            }
            DDist::mix(DDist::delta(shift(*cell, *mv)), DDist::delta(*cell), 0.8)
                .expect("0.8 is a valid weight")
        },
        |cell: &(i32, i32), _mv: &Move| match *cell {
            GOAL => 1.0,
            PIT => -1.0,
            _ => -0.04,
        },
        0.9,
    )
    .expect("grid world is a valid MDP")
    .with_start(DDist::delta((0, 0)))
    .expect("start cell is on the grid")
    .with_terminal(|cell: &(i32, i32)| *cell == GOAL || *cell == PIT);

    let config = SolverConfig::from_default_yaml().expect("default solver config");
    let q = TabularQ::new(cells.clone(), Move::ALL);
    let solution = value_iteration_with_hook(&mdp, q, &config, |table, sweep| {
        if sweep.sweep % 10 == 0 {
            let v = value(table, &(0, 0)).unwrap_or(f64::NAN);
            println!("sweep {:>3} delta={:.6} V(0,0)={v:.4}", sweep.sweep, sweep.delta);
        }
    })
    .expect("value iteration failed");

    println!(
        "converged={} sweeps={} final_delta={:.2e}",
        solution.metrics.converged, solution.metrics.sweeps_completed, solution.metrics.final_delta
    );

    for y in (0..HEIGHT).rev() {
        let row: Vec<String> = (0..WIDTH)
            .map(|x| match greedy(&solution.q, &(x, y)) {
                Ok(mv) => format!("{mv:?}"),
                Err(err) => format!("<{err}>"),
            })
            .collect();
        println!("{}", row.join("\t"));
    }

    println!(
        "expectimax Q((0,0), North, h=5) = {:.4}",
        q_em(&mdp, &(0, 0), &Move::North, 5)
    );

    let mut sim = MdpSimulator::new(mdp, 12345);
    let start = sim.reset();
    let trace = sim
        .run(start, 20, |cell, rng| epsilon_greedy(&solution.q, cell, 0.1, rng))
        .expect("rollout failed");
    let total: f64 = trace.iter().map(|t| t.reward).sum();
    println!("rollout_return={total:.3} steps={}", trace.len());
}
