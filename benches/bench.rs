#![feature(test)]

extern crate test;

use std::io;

use test::Bencher;

use powercsv::{Reader, ReaderBuilder, Writer};

static POP: &'static str = include_str!("../demos/data/uspop.csv");

/// Repeat the data rows of `data` until there are at least `rows` of them.
fn grow(data: &str, rows: usize) -> String {
    let mut lines = data.lines();
    let header = lines.next().unwrap_or("");
    let body: Vec<&str> = lines.collect();
    let mut out = format!("{}\n", header);
    for line in body.iter().cycle().take(rows) {
        out.push_str(line);
        out.push('\n');
    }
    out
}

macro_rules! bench {
    ($name:ident, $rows:expr, $counter:ident, $result:expr) => {
        #[bench]
        fn $name(b: &mut Bencher) {
            let data = grow(POP, $rows);
            let data = data.as_bytes();
            b.bytes = data.len() as u64;
            b.iter(|| {
                let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(data);
                assert_eq!($counter(&mut rdr), $result);
            })
        }
    };
}

bench!(count_pop_records, 10000, count_records, 10000);
bench!(sum_pop_by_name, 10000, sum_population, 64_335_000);

fn count_records<R: io::Read>(rdr: &mut Reader<R>) -> u64 {
    let mut count = 0;
    while let Some(_) = rdr.read_record().unwrap() {
        count += 1;
    }
    count
}

fn sum_population<R: io::Read>(rdr: &mut Reader<R>) -> i64 {
    let mut sum = 0;
    while let Some(rec) = rdr.read_record().unwrap() {
        sum += rec.get_long_by_name_or("Population", 0).unwrap();
    }
    sum
}

#[bench]
fn write_pop_records(b: &mut Bencher) {
    let data = grow(POP, 10000);
    let mut rdr = Reader::from_reader(data.as_bytes());
    rdr.read_headers().unwrap();
    let recs: Vec<_> = rdr.records().map(Result::unwrap).collect();
    b.bytes = data.len() as u64;
    b.iter(|| {
        let mut wtr = Writer::from_writer(vec![]);
        for rec in &recs {
            rec.emit(&mut wtr).unwrap();
        }
        wtr.into_inner().unwrap()
    })
}
