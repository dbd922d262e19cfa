//! A/D input channels.
//!
//! The converter is the 10-bit ADC of a PIC18F4550 with its result
//! right-justified and the references at Vdd (5 V) and Vss.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use crate::Error;

/// Number of analog inputs, AN0 to AN13.
pub const CHANNELS: u8 = 14;

/// Largest conversion result.
pub const FULL_SCALE: u16 = 1023;

/// Positive reference voltage, in millivolts.
pub const VREF_MV: f64 = 5000.;

/// An A/D input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Probe(u8);

impl Probe {
    /// Return the probe reading the analog input `channel`.
    pub fn new(channel: u8) -> Result<Probe, Error> {
        if channel < CHANNELS {
            Ok(Probe(channel))
        } else {
            Err(Error::InvalidChannel(channel))
        }
    }

    pub fn channel(self) -> u8 { self.0 }

    /// Convert a raw conversion result to millivolts.  Results above
    /// [`FULL_SCALE`] are taken as full scale.
    pub fn millivolts(raw: u16) -> f64 {
        f64::from(raw.min(FULL_SCALE)) * VREF_MV / f64::from(FULL_SCALE)
    }
}

impl TryFrom<u8> for Probe {
    type Error = Error;

    fn try_from(channel: u8) -> Result<Self, Self::Error> {
        Probe::new(channel)
    }
}

impl Display for Probe {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "AN{}", self.0)
    }
}

impl FromStr for Probe {
    type Err = Error;

    /// Parse "AN3", "an3" or "3".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s.strip_prefix("AN")
            .or_else(|| s.strip_prefix("an"))
            .unwrap_or(s);
        if n.is_empty() || !n.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidProbe(s.to_string()));
        }
        let channel: u8 = n.parse()
            .map_err(|_| Error::InvalidProbe(s.to_string()))?;
        Probe::new(channel)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels() -> Result<(), Error> {
        assert_eq!(Probe::new(0)?.channel(), 0);
        assert_eq!(Probe::new(13)?.to_string(), "AN13");
        assert!(matches!(Probe::new(14), Err(Error::InvalidChannel(14))));
        assert!(Probe::try_from(255u8).is_err());
        Ok(())
    }

    #[test]
    fn parse() -> Result<(), Error> {
        assert_eq!("AN3".parse::<Probe>()?, Probe::new(3)?);
        assert_eq!("an7".parse::<Probe>()?, Probe::new(7)?);
        assert_eq!("12".parse::<Probe>()?, Probe::new(12)?);
        assert!(matches!("AN20".parse::<Probe>(),
                         Err(Error::InvalidChannel(20))));
        assert!(matches!("AN".parse::<Probe>(), Err(Error::InvalidProbe(_))));
        assert!(matches!("RA0".parse::<Probe>(), Err(Error::InvalidProbe(_))));
        assert!(matches!("AN+3".parse::<Probe>(), Err(Error::InvalidProbe(_))));
        assert!(matches!("+3".parse::<Probe>(), Err(Error::InvalidProbe(_))));
        assert!(matches!("AN 3".parse::<Probe>(), Err(Error::InvalidProbe(_))));
        Ok(())
    }

    #[test]
    fn millivolts() {
        assert_eq!(Probe::millivolts(0), 0.);
        assert_eq!(Probe::millivolts(FULL_SCALE), VREF_MV);
        assert_eq!(Probe::millivolts(u16::MAX), VREF_MV);
        let mid = Probe::millivolts(512);
        assert!((mid - 2502.443).abs() < 1e-3, "{}", mid);
    }
}
