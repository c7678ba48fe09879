//! Generate a pathwalker dungeon and print it.
//!
//! Run: cargo run --bin pathwalk -- --seed 7 --animate

use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;

use pathwalk_core::NullSink;
use pathwalk_crossterm::{Terminal, TerminalSink, print_grid};
use pathwalk_demos::{Options, USAGE};
use pathwalk_gen::{Config, Generator, Summary};

const FRAME: Duration = Duration::from_millis(16);

fn report(summary: &Summary) {
    println!(
        "{} floor tiles, {} walls, {} walkers over {} ticks",
        summary.floor_count, summary.walls, summary.walkers_spawned, summary.ticks
    );
    for (name, chest) in [("weapon chest", summary.weapon_chest), ("ammo chest", summary.ammo_chest)] {
        match chest {
            Some(r) => println!("{name} at {} ({:.2} from the player)", r.pos, r.distance),
            None => println!("no {name}"),
        }
    }
}

fn run_plain(config: Config, max_ticks: Option<u64>) -> Result<(), Box<dyn Error>> {
    let mut generator = Generator::new(config, NullSink)?;
    let summary = generator.run(max_ticks)?;
    let mut stdout = io::stdout().lock();
    print_grid(&mut stdout, generator.grid())?;
    stdout.flush()?;
    report(&summary);
    Ok(())
}

fn run_animated(config: Config, max_ticks: Option<u64>) -> Result<(), Box<dyn Error>> {
    let mut generator = Generator::new(config, TerminalSink::new(io::stdout()))?;
    let term = Terminal::enter()?;
    generator.start_generation()?;
    loop {
        if term.poll_quit(FRAME)? {
            generator.cancel();
            break;
        }
        let done = generator.frame()?;
        let status = format!(
            "tick {}  walkers {}  floor {}",
            generator.ticks(),
            generator.live_walkers().len(),
            generator.grid().floor_count()
        );
        let sink = generator.sink_mut();
        sink.status(&status);
        sink.flush();
        if let Some(err) = sink.take_error() {
            return Err(err.into());
        }
        if done {
            break;
        }
        if max_ticks.is_some_and(|limit| generator.ticks() >= limit) {
            log::warn!("stopping after {} ticks", generator.ticks());
            generator.cancel();
            break;
        }
    }
    let sink = generator.sink_mut();
    sink.status("press any key");
    sink.flush();
    term.wait_key()?;
    term.leave();

    match generator.summary() {
        Some(summary) => report(summary),
        None => println!("generation stopped after {} ticks", generator.ticks()),
    }
    Ok(())
}

fn run(opts: Options) -> Result<(), Box<dyn Error>> {
    let config = opts.load_config()?;
    if opts.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }
    if opts.animate {
        run_animated(config, opts.max_ticks)
    } else {
        run_plain(config, opts.max_ticks)
    }
}

fn main() {
    env_logger::init();
    let opts = match Options::parse(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    if opts.help {
        println!("{USAGE}");
        return;
    }
    if let Err(e) = run(opts) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
