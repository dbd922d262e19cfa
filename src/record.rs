//! A [`Backend`] that draws nothing and remembers every call.
//!
//! Useful to check what a plot does without a display, or to print
//! the calls of a dry run.

use std::fmt::{self, Display, Formatter};
use crate::{Backend, Error, Style};

/// A backend call, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetInteractive(bool),
    Figure,
    Subplot { rows: usize, cols: usize, index: usize },
    Plot {
        x: Option<Vec<f64>>,
        y: Vec<f64>,
        fmt: String,
        label: String,
        linewidth: Option<f64>,
    },
    Title(String),
    XLabel(String),
    YLabel(String),
    Grid(bool),
    Axis([f64; 4]),
    Legend,
    Show,
}

/// The name of a [`Call`], without arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    SetInteractive,
    Figure,
    Subplot,
    Plot,
    Title,
    XLabel,
    YLabel,
    Grid,
    Axis,
    Legend,
    Show,
}

impl Call {
    pub fn kind(&self) -> CallKind {
        match self {
            Call::SetInteractive(_) => CallKind::SetInteractive,
            Call::Figure => CallKind::Figure,
            Call::Subplot { .. } => CallKind::Subplot,
            Call::Plot { .. } => CallKind::Plot,
            Call::Title(_) => CallKind::Title,
            Call::XLabel(_) => CallKind::XLabel,
            Call::YLabel(_) => CallKind::YLabel,
            Call::Grid(_) => CallKind::Grid,
            Call::Axis(_) => CallKind::Axis,
            Call::Legend => CallKind::Legend,
            Call::Show => CallKind::Show,
        }
    }
}

impl Display for Call {
    /// Pyplot-like rendering of the call.  Data are summarized by
    /// their length.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fn on_off(b: bool) -> &'static str { if b { "on" } else { "off" } }
        match self {
            Call::SetInteractive(true) => write!(f, "ion()"),
            Call::SetInteractive(false) => write!(f, "ioff()"),
            Call::Figure => write!(f, "figure()"),
            Call::Subplot { rows, cols, index } =>
                write!(f, "subplot({}, {}, {})", rows, cols, index),
            Call::Plot { x, y, fmt, label, linewidth } => {
                write!(f, "plot(")?;
                if let Some(x) = x {
                    write!(f, "x[{}], ", x.len())?;
                }
                write!(f, "y[{}], {:?}", y.len(), fmt)?;
                if !label.is_empty() {
                    write!(f, ", label={:?}", label)?;
                }
                if let Some(w) = linewidth {
                    write!(f, ", linewidth={}", w)?;
                }
                write!(f, ")")
            }
            Call::Title(s) => write!(f, "title({:?})", s),
            Call::XLabel(s) => write!(f, "xlabel({:?})", s),
            Call::YLabel(s) => write!(f, "ylabel({:?})", s),
            Call::Grid(b) => write!(f, "grid('{}')", on_off(*b)),
            Call::Axis([x0, x1, y0, y1]) =>
                write!(f, "axis([{}, {}, {}, {}])", x0, x1, y0, y1),
            Call::Legend => write!(f, "legend()"),
            Call::Show => write!(f, "show()"),
        }
    }
}

/// Records the calls it receives, in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Vec<Call>,
    fail_on: Option<CallKind>,
}

impl Recorder {
    pub fn new() -> Self { Self::default() }

    /// Make the next call of kind `kind` fail with [`Error::Backend`].
    /// The failing call is not recorded.
    #[must_use]
    pub fn fail_on(mut self, kind: CallKind) -> Self {
        self.fail_on = Some(kind);
        self
    }

    pub fn calls(&self) -> &[Call] { &self.calls }

    pub fn clear(&mut self) { self.calls.clear() }

    /// Number of recorded calls of kind `kind`.
    pub fn count(&self, kind: CallKind) -> usize {
        self.calls.iter().filter(|c| c.kind() == kind).count()
    }

    fn record(&mut self, call: Call) -> Result<(), Error> {
        if self.fail_on == Some(call.kind()) {
            self.fail_on = None;
            return Err(Error::Backend(format!("{} refused", call)));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl Backend for Recorder {
    fn set_interactive(&mut self, on: bool) -> Result<(), Error> {
        self.record(Call::SetInteractive(on))
    }

    fn figure(&mut self) -> Result<(), Error> {
        self.record(Call::Figure)
    }

    fn subplot(&mut self, rows: usize, cols: usize, index: usize)
               -> Result<(), Error> {
        self.record(Call::Subplot { rows, cols, index })
    }

    fn plot(&mut self, x: Option<&[f64]>, y: &[f64], style: &Style<'_>)
            -> Result<(), Error> {
        self.record(Call::Plot { x: x.map(|x| x.to_vec()),
                                 y: y.to_vec(),
                                 fmt: style.fmt.to_string(),
                                 label: style.label.to_string(),
                                 linewidth: style.linewidth })
    }

    fn title(&mut self, title: &str) -> Result<(), Error> {
        self.record(Call::Title(title.to_string()))
    }

    fn xlabel(&mut self, label: &str) -> Result<(), Error> {
        self.record(Call::XLabel(label.to_string()))
    }

    fn ylabel(&mut self, label: &str) -> Result<(), Error> {
        self.record(Call::YLabel(label.to_string()))
    }

    fn grid(&mut self, on: bool) -> Result<(), Error> {
        self.record(Call::Grid(on))
    }

    fn axis(&mut self, limits: [f64; 4]) -> Result<(), Error> {
        self.record(Call::Axis(limits))
    }

    fn legend(&mut self) -> Result<(), Error> {
        self.record(Call::Legend)
    }

    fn show(&mut self) -> Result<(), Error> {
        self.record(Call::Show)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() -> Result<(), Error> {
        let mut rec = Recorder::new();
        rec.figure()?;
        rec.grid(false)?;
        rec.show()?;
        assert_eq!(rec.calls(),
                   &[Call::Figure, Call::Grid(false), Call::Show]);
        rec.clear();
        assert!(rec.calls().is_empty());
        Ok(())
    }

    #[test]
    fn fails_once() {
        let mut rec = Recorder::new().fail_on(CallKind::Show);
        assert!(matches!(rec.show(), Err(Error::Backend(_))));
        assert_eq!(rec.count(CallKind::Show), 0);
        assert!(rec.show().is_ok());
        assert_eq!(rec.count(CallKind::Show), 1);
    }

    #[test]
    fn display() {
        let plot = Call::Plot { x: Some(vec![0.; 51]), y: vec![0.; 51],
                                fmt: "ro-".into(), label: "AN0".into(),
                                linewidth: None };
        assert_eq!(plot.to_string(),
                   "plot(x[51], y[51], \"ro-\", label=\"AN0\")");
        assert_eq!(Call::Grid(true).to_string(), "grid('on')");
        assert_eq!(Call::Axis([0., 1., -1.5, 1.5]).to_string(),
                   "axis([0, 1, -1.5, 1.5])");
        assert_eq!(Call::SetInteractive(true).to_string(), "ion()");
    }
}
