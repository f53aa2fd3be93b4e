//! Voltlab - DC circuit workbench demo
//!
//! Builds a single battery/load loop from the command line, runs the solver
//! for a number of ticks, and prints the solved state and diagnostics.
//!
//! # Usage
//!
//! ```bash
//! voltlab --emf 9 --load 10 --ticks 5
//! ```

use clap::Parser;
use voltlab_core::circuit::Position;
use voltlab_core::components::ComponentKind;
use voltlab_core::instruments::OhmmeterReading;
use voltlab_core::Simulation;

/// DC circuit workbench demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Battery EMF in volts
    #[arg(short, long, default_value_t = 9.0)]
    emf: f64,

    /// Load resistance in ohms
    #[arg(short, long, default_value_t = 10.0)]
    load: f64,

    /// Number of solver ticks to run
    #[arg(short, long, default_value_t = 1)]
    ticks: u32,

    /// Short the battery with a wire instead of the load
    #[arg(long, default_value_t = false)]
    short: bool,
}

fn main() {
    let args = Args::parse();

    let mut sim = Simulation::new();
    let a = sim.graph_mut().add_node(Position::new(0.0, 0.0));
    let b = sim.graph_mut().add_node(Position::new(40.0, 0.0));
    sim.graph_mut()
        .add_component(ComponentKind::Battery, a, b, args.emf)
        .expect("endpoints exist");
    let load = if args.short {
        sim.graph_mut()
            .add_component(ComponentKind::Wire, a, b, 0.0)
    } else {
        sim.graph_mut()
            .add_component(ComponentKind::Resistor, a, b, args.load)
    }
    .expect("endpoints exist");

    for _ in 0..args.ticks {
        sim.tick();
    }

    println!("V({a}) = {:.3} V", sim.node_voltage(a));
    println!("V({b}) = {:.3} V", sim.node_voltage(b));
    println!(
        "load: {} = {}, I = {:.3} A",
        load,
        sim.ohmmeter(load).unwrap_or(OhmmeterReading::NotApplicable),
        sim.ammeter(load)
    );

    let report = sim.report();
    println!("total EMF:       {:.3} V", report.total_emf);
    println!("generated power: {:.3} W", report.generated_power);
    println!("consumed power:  {:.3} W", report.consumed_power);
    if report.is_short_circuit {
        println!("!! short circuit");
    }
    if report.is_overheating {
        println!("!! overheating");
    }
    for id in &report.burned_out {
        println!("!! component {id} burned out");
    }
}
