//! Plot synthetic A/D signals.
//!
//!     cargo run --example sine_cosine
//!     RUST_LOG=ad_plot=trace cargo run --example sine_cosine -- --dry-run

use std::{error::Error, f64::consts::PI};
use clap::Parser;
use ndarray::Array1;
use tracing_subscriber::EnvFilter;
use ad_plot::{self as adp, AdPlot, Backend, Config, Probe, Pyplot, Recorder};

#[derive(Parser, Debug)]
#[command(name = "sine_cosine")]
#[command(about = "Plot synthetic sine/cosine A/D signals", long_about = None)]
struct Args {
    /// Do not draw a grid
    #[arg(long)]
    no_grid: bool,

    /// What the probes measure
    #[arg(long, default_value = "voltage")]
    measure: String,

    /// Print the plotting calls instead of opening a window
    #[arg(long)]
    dry_run: bool,
}

/// Raw 10-bit counts of a signal given in millivolts.
fn counts(mv: &Array1<f64>) -> Vec<u16> {
    let full = f64::from(adp::probe::FULL_SCALE);
    mv.iter()
        .map(|v| (v / adp::probe::VREF_MV * full).round().clamp(0., full) as u16)
        .collect()
}

fn draw<B: Backend>(mut plot: AdPlot<B>) -> Result<AdPlot<B>, adp::Error> {
    let t = Array1::linspace(0., 1., 51);
    let y1 = t.mapv(|t| (2. * PI * t).sin());
    let y2 = t.mapv(|t| (2. * PI * 3. * t).cos());

    plot.subplot(3, 1, 1)?;
    plot.xy(&t, &y1).fmt("ro-").label("sin")
        .xy(&t, &y2).fmt("b--").label("cos")
        .plot()?;
    plot.title("This is the title")?;
    plot.ylabel(adp::YLABEL)?;
    plot.axis([0., 1., -1.5, 1.5])?;

    let sum = &y1 + &y2;
    plot.subplot(3, 1, 2)?;
    plot.xy(&t, &sum).fmt("m:").plot()?;
    plot.axis([0., 1., -3., 3.])?;
    plot.grid(plot.grid_enabled())?;
    plot.ylabel(adp::YLABEL)?;

    let raw: Vec<Vec<u16>> = [&y1, &y2].iter()
        .map(|y| counts(&y.mapv(|y| 2500. + 2000. * y)))
        .collect();
    plot.subplot(3, 1, 3)?;
    plot.plot_probes(&t, &raw)?;
    plot.axis([0., 1., 0., adp::probe::VREF_MV])?;
    plot.grid(plot.grid_enabled())?;
    plot.xlabel("time (sec)")?;
    plot.ylabel(adp::YLABEL)?;
    plot.legend()?;

    // Blocks until the window is closed.
    plot.set_interactive(false)?;
    plot.show()?;
    Ok(plot)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::new()
        .measure(args.measure.as_str())
        .grid(!args.no_grid);
    let probes = [Probe::new(0)?, Probe::new(1)?];

    if args.dry_run {
        let plot = draw(AdPlot::with_config(Recorder::new(), probes, config)?)?;
        for call in plot.backend().calls() {
            println!("{}", call);
        }
        return Ok(());
    }

    draw(AdPlot::with_config(Pyplot::new()?, probes, config)?)?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use ad_plot::{Call, CallKind};

    #[test]
    fn shows_with_interactive_mode_off() -> Result<(), adp::Error> {
        let probes = [Probe::new(0)?, Probe::new(1)?];
        let plot = draw(AdPlot::new(Recorder::new(), probes)?)?;
        let calls = plot.backend().calls();
        assert_eq!(calls.first(), Some(&Call::SetInteractive(true)));
        assert_eq!(&calls[calls.len() - 2..],
                   &[Call::SetInteractive(false), Call::Show]);
        assert_eq!(plot.backend().count(CallKind::Show), 1);
        assert_eq!(plot.backend().count(CallKind::Plot), 5);
        Ok(())
    }

    #[test]
    fn counts_stay_in_range() {
        let mv = Array1::from(vec![-100., 0., 2500., 5000., 6000.]);
        assert_eq!(counts(&mv), vec![0, 0, 512, 1023, 1023]);
    }
}
