use std::io::Error;
use std::path::Path;

pub const KEY: &str = "e96bc856-affa-4c0c-ab59-5dfcc732ef34";
pub const NAME: &str = "Gustavo E R R Oliveira";
pub const CITY: &str = "Balneário Camboriú";

/// Payment code for 7.99 issued by the merchant above.
pub const VIP_PAYLOAD: &str = "00020126580014BR.GOV.BCB.PIX0136e96bc856-affa-4c0c-ab59-5dfcc732ef34\
    52040000530398654047.995802BR5922GUSTAVO E R R OLIVEIRA6015BALNEARIO CAMBO\
    62070503***6304AA65";

pub fn write_charges_csv(path: &Path, rows: &[[&str; 2]]) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    wtr.write_record(["amount", "description"])?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
