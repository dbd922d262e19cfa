//! Voltage-vs-time plots of A/D (analog/digital) measurements.
//!
//! Usage
//! -----
//!
//! [`AdPlot`] prepares a figure the way an A/D plot is expected to
//! look: interactive mode on, a fresh figure, the Y axis labelled
//! `voltage (mV)` and, unless disabled, a grid.  Drawing goes through
//! a [`Backend`]: [`Pyplot`] talks to [Matplotlib][]'s `pyplot`,
//! [`Recorder`] keeps the calls in memory.
//!
//! ```
//! use ad_plot::{AdPlot, Probe, Recorder};
//! let mut rec = Recorder::new();
//! let mut plot = AdPlot::new(&mut rec, [Probe::new(0)?])?;
//! plot.xy(&[0., 0.5, 1.], &[0., 2.5, 5.]).fmt("ro-").plot()?;
//! plot.show()?;
//! assert!(plot.is_shown());
//! # Ok::<(), ad_plot::Error>(())
//! ```
//!
//! [Matplotlib]: https://matplotlib.org/

use std::{
    borrow::Cow,
    convert::Infallible,
    fmt::{self, Display, Formatter},
    mem::swap,
    str::FromStr,
};
use ndarray::{ArrayBase, Ix1};
use tracing::debug;

pub mod probe;
pub mod record;
#[cfg(feature = "pyplot")]
mod pyplot;

pub use probe::Probe;
pub use record::{Call, CallKind, Recorder};
#[cfg(feature = "pyplot")]
pub use pyplot::Pyplot;

/// Label put on the Y axis when an [`AdPlot`] is created.
pub const YLABEL: &str = "voltage (mV)";

/// Possible errors of the plotting functions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Python library "matplotlib" was not found.
    #[cfg(feature = "pyplot")]
    #[error("The matplotlib library has not been found.\n\
             Please install it.  See https://matplotlib.org/")]
    NoMatplotlib,
    /// Python raised an exception.
    #[cfg(feature = "pyplot")]
    #[error("Python error: {0}")]
    Python(#[from] pyo3::PyErr),
    /// A backend other than pyplot refused a call.
    #[error("Backend error: {0}")]
    Backend(String),
    /// The A/D converter has no such input channel.
    #[error("A/D channel {0} does not exist (channels are 0 to 13)")]
    InvalidChannel(u8),
    /// The string does not name a probe.
    #[error("Invalid probe name {0:?}, expected \"AN<n>\" or \"<n>\"")]
    InvalidProbe(String),
    /// [`AdPlot::plot_probes`] needs one series per probe.
    #[error("{series} series given for {probes} probes")]
    ProbeCount { probes: usize, series: usize },
}

/// Plotting primitives an [`AdPlot`] needs.  They act on the
/// "current" figure and axes, pyplot style.
pub trait Backend {
    /// Turn interactive (non-blocking) mode on or off.
    fn set_interactive(&mut self, on: bool) -> Result<(), Error>;

    /// Create a new figure and make it the current one.
    fn figure(&mut self) -> Result<(), Error>;

    /// Make cell `index` (1-based) of a `rows` × `cols` grid the
    /// current axes.
    fn subplot(&mut self, rows: usize, cols: usize, index: usize)
               -> Result<(), Error>;

    /// Plot `y` versus `x`, or versus its indices if `x` is `None`.
    fn plot(&mut self, x: Option<&[f64]>, y: &[f64], style: &Style<'_>)
            -> Result<(), Error>;

    fn title(&mut self, title: &str) -> Result<(), Error>;

    fn xlabel(&mut self, label: &str) -> Result<(), Error>;

    fn ylabel(&mut self, label: &str) -> Result<(), Error>;

    fn grid(&mut self, on: bool) -> Result<(), Error>;

    /// Set the view limits `[xmin, xmax, ymin, ymax]`.
    fn axis(&mut self, limits: [f64; 4]) -> Result<(), Error>;

    fn legend(&mut self) -> Result<(), Error>;

    /// Render the current figures.
    fn show(&mut self) -> Result<(), Error>;
}

impl<B> Backend for &mut B where B: Backend + ?Sized {
    fn set_interactive(&mut self, on: bool) -> Result<(), Error> {
        (**self).set_interactive(on)
    }
    fn figure(&mut self) -> Result<(), Error> { (**self).figure() }
    fn subplot(&mut self, rows: usize, cols: usize, index: usize)
               -> Result<(), Error> {
        (**self).subplot(rows, cols, index)
    }
    fn plot(&mut self, x: Option<&[f64]>, y: &[f64], style: &Style<'_>)
            -> Result<(), Error> {
        (**self).plot(x, y, style)
    }
    fn title(&mut self, title: &str) -> Result<(), Error> {
        (**self).title(title)
    }
    fn xlabel(&mut self, label: &str) -> Result<(), Error> {
        (**self).xlabel(label)
    }
    fn ylabel(&mut self, label: &str) -> Result<(), Error> {
        (**self).ylabel(label)
    }
    fn grid(&mut self, on: bool) -> Result<(), Error> { (**self).grid(on) }
    fn axis(&mut self, limits: [f64; 4]) -> Result<(), Error> {
        (**self).axis(limits)
    }
    fn legend(&mut self) -> Result<(), Error> { (**self).legend() }
    fn show(&mut self) -> Result<(), Error> { (**self).show() }
}

/// Trait expressing that `Self` can be seen as a sequence of `f64`.
/// Contiguous data is borrowed, other data is copied.
pub trait Data {
    fn values(&self) -> Cow<'_, [f64]>;
}

impl Data for [f64] {
    fn values(&self) -> Cow<'_, [f64]> { Cow::Borrowed(self) }
}

impl Data for Vec<f64> {
    fn values(&self) -> Cow<'_, [f64]> { Cow::Borrowed(self) }
}

impl<const N: usize> Data for [f64; N] {
    fn values(&self) -> Cow<'_, [f64]> { Cow::Borrowed(self) }
}

impl<S> Data for ArrayBase<S, Ix1> where S: ndarray::Data<Elem = f64> {
    fn values(&self) -> Cow<'_, [f64]> {
        match self.as_slice() {
            Some(x) => Cow::Borrowed(x),
            None => Cow::Owned(self.to_vec()),
        }
    }
}

/// Line options of a plotted series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style<'a> {
    /// Matplotlib format string such as `"ro-"` or `"b--"`.  Empty
    /// means the backend's default.
    pub fmt: &'a str,
    /// Legend entry.  Empty means none.
    pub label: &'a str,
    pub linewidth: Option<f64>,
}

/// What the probes measure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Measure {
    #[default]
    Voltage,
    Current,
    Other(String),
}

impl Measure {
    pub fn as_str(&self) -> &str {
        match self {
            Measure::Voltage => "voltage",
            Measure::Current => "current",
            Measure::Other(s) => s,
        }
    }
}

impl Display for Measure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Measure {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Measure::from(s))
    }
}

impl From<&str> for Measure {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("voltage") {
            Measure::Voltage
        } else if s.eq_ignore_ascii_case("current") {
            Measure::Current
        } else {
            Measure::Other(s.to_string())
        }
    }
}

/// Options of [`AdPlot::with_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub measure: Measure,
    /// Draw a grid on the figure (default: `true`).
    pub grid: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config { measure: Measure::Voltage, grid: true }
    }
}

impl Config {
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn measure(mut self, measure: impl Into<Measure>) -> Self {
        self.measure = measure.into();
        self
    }

    #[must_use]
    pub fn grid(mut self, on: bool) -> Self {
        self.grid = on;
        self
    }
}

/// A figure set up for A/D measurements, drawn through the backend `B`.
#[derive(Debug)]
pub struct AdPlot<B: Backend> {
    backend: B,
    probes: Vec<Probe>,
    measure: Measure,
    grid: bool,
    shown: bool,
}

impl<B: Backend> AdPlot<B> {
    /// Configure a figure for `probes` with the default [`Config`].
    pub fn new(backend: B, probes: impl IntoIterator<Item = Probe>)
               -> Result<Self, Error> {
        Self::with_config(backend, probes, Config::default())
    }

    /// Put the backend in interactive mode, create a figure, label
    /// its Y axis with [`YLABEL`] and draw a grid if `config.grid`.
    /// The first backend error is returned as is.
    pub fn with_config(
        mut backend: B,
        probes: impl IntoIterator<Item = Probe>,
        config: Config,
    ) -> Result<Self, Error> {
        backend.set_interactive(true)?;
        backend.figure()?;
        backend.ylabel(YLABEL)?;
        if config.grid {
            backend.grid(true)?;
        }
        let probes: Vec<Probe> = probes.into_iter().collect();
        debug!(probes = probes.len(), measure = %config.measure,
               grid = config.grid, "A/D figure configured");
        Ok(AdPlot { backend,
                    probes,
                    measure: config.measure,
                    grid: config.grid,
                    shown: false })
    }

    /// Render the figure.  Each call renders again.
    pub fn show(&mut self) -> Result<(), Error> {
        self.backend.show()?;
        self.shown = true;
        debug!("A/D figure shown");
        Ok(())
    }

    pub fn is_shown(&self) -> bool { self.shown }

    pub fn probes(&self) -> &[Probe] { &self.probes }

    pub fn measure(&self) -> &Measure { &self.measure }

    /// Whether the grid was requested at construction.
    pub fn grid_enabled(&self) -> bool { self.grid }

    pub fn backend(&self) -> &B { &self.backend }

    pub fn backend_mut(&mut self) -> &mut B { &mut self.backend }

    pub fn into_backend(self) -> B { self.backend }

    pub fn set_interactive(&mut self, on: bool) -> Result<(), Error> {
        self.backend.set_interactive(on)
    }

    /// Draw the next series in cell `index` (1-based) of a `rows` ×
    /// `cols` grid.
    pub fn subplot(&mut self, rows: usize, cols: usize, index: usize)
                   -> Result<(), Error> {
        self.backend.subplot(rows, cols, index)
    }

    pub fn title(&mut self, title: &str) -> Result<(), Error> {
        self.backend.title(title)
    }

    pub fn xlabel(&mut self, label: &str) -> Result<(), Error> {
        self.backend.xlabel(label)
    }

    pub fn ylabel(&mut self, label: &str) -> Result<(), Error> {
        self.backend.ylabel(label)
    }

    pub fn grid(&mut self, on: bool) -> Result<(), Error> {
        self.backend.grid(on)
    }

    /// Set the view limits `[xmin, xmax, ymin, ymax]`.
    pub fn axis(&mut self, limits: [f64; 4]) -> Result<(), Error> {
        self.backend.axis(limits)
    }

    pub fn legend(&mut self) -> Result<(), Error> {
        self.backend.legend()
    }

    /// Plot `y` versus `x` as lines and/or markers.
    ///
    /// # Example
    ///
    /// ```
    /// use ad_plot::{AdPlot, Recorder};
    /// let mut plot = AdPlot::new(Recorder::new(), [])?;
    /// let t = [0., 1., 2.];
    /// plot.xy(&t, &[1., 4., 2.]).fmt("ro-").label("AN0")
    ///     .xy(&t, &[3., 0., 1.]).fmt("b--").label("AN1")
    ///     .plot()?;
    /// # Ok::<(), ad_plot::Error>(())
    /// ```
    // FIXME: `x` and `y` of different lengths are left to the backend.
    pub fn xy<'a, D>(&'a mut self, x: &'a D, y: &'a D) -> Series<'a, B, D>
    where D: Data + ?Sized {
        Series { plot: self,
                 options: Style::default(),
                 data: PlotData::XY(x, y),
                 prev_data: vec![] }
    }

    /// Plot `y` versus its indices as lines and/or markers.
    pub fn y<'a, D>(&'a mut self, y: &'a D) -> Series<'a, B, D>
    where D: Data + ?Sized {
        Series { plot: self,
                 options: Style::default(),
                 data: PlotData::Y(y),
                 prev_data: vec![] }
    }

    /// Plot, versus `t`, one series per probe.  `counts[i]` holds the
    /// raw A/D counts of the `i`-th probe; they are drawn in
    /// millivolts and labelled "`<probe> <measure>`".
    pub fn plot_probes<D, C>(&mut self, t: &D, counts: &[C])
                             -> Result<(), Error>
    where D: Data + ?Sized,
          C: AsRef<[u16]> {
        if counts.len() != self.probes.len() {
            return Err(Error::ProbeCount { probes: self.probes.len(),
                                           series: counts.len() });
        }
        let t = t.values();
        for (probe, raw) in self.probes.iter().zip(counts) {
            let mv: Vec<f64> = raw.as_ref().iter()
                .map(|&c| Probe::millivolts(c)).collect();
            let label = format!("{} {}", probe, self.measure);
            let style = Style { label: &label, ..Style::default() };
            self.backend.plot(Some(&*t), &mv, &style)?;
        }
        Ok(())
    }
}

enum PlotData<'a, D>
where D: ?Sized {
    XY(&'a D, &'a D),
    Y(&'a D),
}

impl<'a, D> PlotData<'a, D>
where D: Data + ?Sized {
    fn send<B: Backend>(&self, backend: &mut B, style: &Style<'_>)
                        -> Result<(), Error> {
        match self {
            PlotData::XY(x, y) => {
                let x = x.values();
                backend.plot(Some(&*x), &y.values(), style) }
            PlotData::Y(y) => {
                backend.plot(None, &y.values(), style) }
        }
    }
}

/// One or more datasets waiting to be plotted, see [`AdPlot::xy`].
#[must_use]
pub struct Series<'a, B, D>
where B: Backend, D: ?Sized {
    plot: &'a mut AdPlot<B>,
    // Latest data and its setting.
    options: Style<'a>,
    data: PlotData<'a, D>,
    // Previous data with their settings.
    prev_data: Vec<(Style<'a>, PlotData<'a, D>)>,
}

impl<'a, B, D> Series<'a, B, D>
where B: Backend, D: Data + ?Sized {
    pub fn fmt(mut self, fmt: &'a str) -> Self {
        self.options.fmt = fmt;
        self
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.options.label = label;
        self
    }

    pub fn linewidth(mut self, w: f64) -> Self {
        self.options.linewidth = Some(w);
        self
    }

    /// Add the dataset (`x`, `y`).  It starts with the options of the
    /// previous one.
    pub fn xy(mut self, x: &'a D, y: &'a D) -> Self {
        let mut data = PlotData::XY(x, y);
        swap(&mut data, &mut self.data);
        self.prev_data.push((self.options.clone(), data));
        self
    }

    /// Add the dataset `y`.
    pub fn y(mut self, y: &'a D) -> Self {
        let mut data = PlotData::Y(y);
        swap(&mut data, &mut self.data);
        self.prev_data.push((self.options.clone(), data));
        self
    }

    /// Plot all datasets, in the order they were given.
    pub fn plot(self) -> Result<(), Error> {
        let Series { plot, options, data, prev_data } = self;
        for (opt, data) in prev_data.iter() {
            data.send(&mut plot.backend, opt)?;
        }
        data.send(&mut plot.backend, &options)
    }
}


#[cfg(doctest)]
doc_comment::doctest!("../README.md");
