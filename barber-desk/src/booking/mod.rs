//! Booking flow: the wizard and the slot availability it relies on

pub mod slots;
pub mod wizard;

pub use slots::{Slot, SlotOptions, SlotPolicy, DEFAULT_SLOT_MINUTES};
pub use wizard::{
    upcoming_dates, BackOutcome, BarberChoice, BookingSummary, BookingWizard, Step, WizardConfig,
    WizardError, DEFAULT_BOOKING_DAYS, FIRST_AVAILABLE,
};
