//! [`Backend`] calling Matplotlib's `pyplot` module.

use lazy_static::lazy_static;
use numpy::PyArray1;
use pyo3::{
    prelude::*,
    intern,
    types::PyDict,
};
use tracing::trace;
use crate::{Backend, Error, Style};

/// Import and return a handle to the module `name`.
fn import(name: &str) -> Result<Py<PyModule>, PyErr> {
    Python::with_gil(|py| PyModule::import_bound(py, name).map(|m| m.unbind()))
}

lazy_static! {
    static ref PYPLOT: Result<Py<PyModule>, PyErr> = {
        import("matplotlib.pyplot")
    };
}

/// A failed import means Matplotlib is missing.
fn module(m: &Result<Py<PyModule>, PyErr>) -> Result<&Py<PyModule>, Error> {
    m.as_ref().map_err(|_| Error::NoMatplotlib)
}

/// Return a handle to `matplotlib.pyplot`.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
fn pyplot() -> Result<&'static Py<PyModule>, Error> {
    module(&PYPLOT)
}

/// Call the pyplot function `$f` with the arguments `$args`.
macro_rules! call {
    ($f: literal, $py: ident -> $args: expr) => {{
        let plt = pyplot()?;
        trace!(call = $f, "pyplot");
        Python::with_gil(|$py| -> Result<(), Error> {
            plt.bind($py).call_method1(intern!($py, $f), $args)?;
            Ok(())
        })
    }};
    ($f: literal, $args: expr) => { call!($f, py -> $args) };
}

fn kwargs<'py>(py: Python<'py>, style: &Style<'_>)
               -> PyResult<Bound<'py, PyDict>> {
    let kwargs = PyDict::new_bound(py);
    if !style.label.is_empty() {
        kwargs.set_item("label", style.label)?;
    }
    if let Some(w) = style.linewidth {
        kwargs.set_item("linewidth", w)?;
    }
    Ok(kwargs)
}

/// Handle to the process-wide pyplot session.  All `Pyplot` values
/// draw on the same figures.
#[derive(Debug, Clone, Copy)]
pub struct Pyplot {
    _private: (),
}

impl Pyplot {
    /// Return a handle to pyplot or [`Error::NoMatplotlib`] if
    /// Matplotlib cannot be imported.
    pub fn new() -> Result<Pyplot, Error> {
        pyplot()?;
        Ok(Pyplot { _private: () })
    }
}

impl Backend for Pyplot {
    fn set_interactive(&mut self, on: bool) -> Result<(), Error> {
        if on { call!("ion", ()) } else { call!("ioff", ()) }
    }

    fn figure(&mut self) -> Result<(), Error> {
        call!("figure", ())
    }

    fn subplot(&mut self, rows: usize, cols: usize, index: usize)
               -> Result<(), Error> {
        call!("subplot", (rows, cols, index))
    }

    fn plot(&mut self, x: Option<&[f64]>, y: &[f64], style: &Style<'_>)
            -> Result<(), Error> {
        let plt = pyplot()?;
        trace!(call = "plot", n = y.len(), fmt = style.fmt,
               label = style.label, "pyplot");
        Python::with_gil(|py| -> Result<(), Error> {
            let plt = plt.bind(py);
            let kwargs = kwargs(py, style)?;
            let yn = PyArray1::from_slice_bound(py, y);
            match x {
                Some(x) => {
                    let xn = PyArray1::from_slice_bound(py, x);
                    plt.call_method(intern!(py, "plot"),
                                    (xn, yn, style.fmt), Some(&kwargs))?
                }
                None => plt.call_method(intern!(py, "plot"),
                                        (yn, style.fmt), Some(&kwargs))?,
            };
            Ok(())
        })
    }

    fn title(&mut self, title: &str) -> Result<(), Error> {
        call!("title", (title,))
    }

    fn xlabel(&mut self, label: &str) -> Result<(), Error> {
        call!("xlabel", (label,))
    }

    fn ylabel(&mut self, label: &str) -> Result<(), Error> {
        call!("ylabel", (label,))
    }

    fn grid(&mut self, on: bool) -> Result<(), Error> {
        call!("grid", (on,))
    }

    fn axis(&mut self, limits: [f64; 4]) -> Result<(), Error> {
        call!("axis", (limits.to_vec(),))
    }

    fn legend(&mut self) -> Result<(), Error> {
        call!("legend", ())
    }

    fn show(&mut self) -> Result<(), Error> {
        call!("show", ())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AdPlot, Probe};

    #[test]
    fn style_to_kwargs() -> Result<(), Error> {
        Python::with_gil(|py| -> Result<(), Error> {
            let kw = kwargs(py, &Style::default())?;
            assert!(kw.is_empty());

            let style = Style { fmt: "ro-", label: "AN0 voltage",
                                linewidth: Some(1.5) };
            let kw = kwargs(py, &style)?;
            assert_eq!(kw.len(), 2);
            let label = kw.get_item("label")?.map(|l| l.extract::<String>());
            assert_eq!(label.transpose()?.as_deref(), Some("AN0 voltage"));
            let w = kw.get_item("linewidth")?.map(|w| w.extract::<f64>());
            assert_eq!(w.transpose()?, Some(1.5));
            assert!(kw.get_item("fmt")?.is_none());

            let kw = kwargs(py, &Style { linewidth: None, ..style })?;
            assert!(kw.get_item("label")?.is_some());
            assert!(kw.get_item("linewidth")?.is_none());

            let kw = kwargs(py, &Style { fmt: "b--", ..Style::default() })?;
            assert!(kw.get_item("label")?.is_none());
            assert!(kw.get_item("linewidth")?.is_none());
            Ok(())
        })
    }

    #[test]
    fn failed_import_is_no_matplotlib() {
        let m = import("ad_plot_no_such_module");
        assert!(m.is_err());
        assert!(matches!(module(&m), Err(Error::NoMatplotlib)));
    }

    #[test]
    #[ignore = "needs matplotlib"]
    fn a_basic_figure() -> Result<(), Error> {
        let mut plot = AdPlot::new(Pyplot::new()?, [Probe::new(0)?])?;
        plot.subplot(2, 1, 1)?;
        plot.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).fmt("ro-")
            .label("a").plot()?;
        plot.axis([0., 5., 0., 5.])?;
        plot.subplot(2, 1, 2)?;
        plot.plot_probes(&[0., 1., 2.], &[[0u16, 512, 1023]])?;
        plot.legend()?;
        plot.set_interactive(false)?;
        Ok(())
    }
}
