use std::error::Error;
use std::io;
use std::process;

fn example() -> Result<(), Box<dyn Error>> {
    let mut rdr = powercsv::Reader::from_reader(io::stdin());
    // The first line names the columns. Every record after it is bound to
    // that header, so fields can be looked up by name.
    rdr.read_headers()?;
    for result in rdr.records() {
        let record = result?;
        let city = record.get_by_name_or("City", "?")?;
        // A blank population is `None`, not an error.
        match record.get_long_by_name("Population")? {
            Some(pop) => println!("{}: {}", city, pop),
            None => println!("{}: unknown", city),
        }
    }
    Ok(())
}

fn main() {
    if let Err(err) = example() {
        println!("error running example: {}", err);
        process::exit(1);
    }
}
