#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut rdr = powercsv::Reader::from_reader(data);
    let mut wtr = powercsv::Writer::from_writer(vec![]);
    if rdr.read_headers().is_err() {
        return;
    }
    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(_) => return,
        };
        let _ = record.get_long(0);
        let _ = record.get_decimal(1);
        let _ = wtr.write_record(&record);
    }
});
