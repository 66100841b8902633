use crate::domain::charge::Charge;
use crate::error::Result;
use std::io::Write;

/// Writes issued charges as CSV rows of `description,amount,payload`.
pub struct ChargeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ChargeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_charge(&mut self, charge: &Charge) -> Result<()> {
        self.writer.serialize(charge)?;
        Ok(())
    }

    pub fn write_charges<'a>(&mut self, charges: impl IntoIterator<Item = &'a Charge>) -> Result<()> {
        for charge in charges {
            self.write_charge(charge)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
