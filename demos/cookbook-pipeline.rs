use std::env;
use std::error::Error;
use std::io;
use std::process;

fn run() -> Result<(), Box<dyn Error>> {
    let minimum_pop: i64 = match env::args().nth(1) {
        None => return Err(From::from("expected 1 argument, but got none")),
        Some(arg) => arg.parse()?,
    };

    let mut rdr = powercsv::Reader::from_reader(io::stdin());
    let mut wtr = powercsv::Writer::from_writer(io::stdout());
    wtr.set_headers(rdr.read_headers()?)?;

    for result in rdr.records() {
        let record = result?;
        let pop = record.get_long_by_name("Population")?;
        if pop.map_or(false, |pop| pop >= minimum_pop) {
            record.emit(&mut wtr)?;
        }
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        println!("{}", err);
        process::exit(1);
    }
}
