use std::error::Error;
use std::io;
use std::process;

fn example() -> Result<(), Box<dyn Error>> {
    let mut wtr = powercsv::Writer::from_writer(io::stdout());
    wtr.set_headers(&["city", "region", "country", "population"])?;

    let mut rec = wtr.begin_record();
    rec.append("Southborough").append("MA").append("United States").append(9686);
    rec.emit(&mut wtr)?;

    // Columns can be filled by name and in any order. Columns that are
    // never set are written as empty fields.
    let mut rec = wtr.begin_record();
    rec.set("population", 14061)?.set("city", "Northbridge, MA")?;
    rec.emit(&mut wtr)?;

    wtr.write_fields(&["Concord", "MA", "United States", "\"old\" town"])?;
    Ok(())
}

fn main() {
    if let Err(err) = example() {
        println!("error running example: {}", err);
        process::exit(1);
    }
}
