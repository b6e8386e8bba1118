use ap_core::{PassengerId, ScannerId};

/// Resumption points of the passenger process and the arrival stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimEvent {
    /// The next passenger arrives.
    Arrival,
    /// A boarding-checker slot was granted to this passenger.
    CheckerGranted(PassengerId),
    /// Boarding-pass check finished.
    CheckDone(PassengerId),
    /// The chosen scanner lane was granted.
    ScannerGranted(PassengerId, ScannerId),
    /// Personal scan finished.
    ScanDone(PassengerId, ScannerId),
}

impl SimEvent {
    pub fn label(self) -> &'static str {
        match self {
            SimEvent::Arrival => "Arrival",
            SimEvent::CheckerGranted(_) => "CheckerGranted",
            SimEvent::CheckDone(_) => "CheckDone",
            SimEvent::ScannerGranted(..) => "ScannerGranted",
            SimEvent::ScanDone(..) => "ScanDone",
        }
    }
}
