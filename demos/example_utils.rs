use std::io::Write;
use std::thread;

use env_logger::Builder;
use log::LevelFilter;

pub fn setup_logger(log_thread: bool, rust_log: Option<&String>) {
    let mut builder = Builder::new();
    builder
        .format(move |buf, record| {
            let thread_name = if log_thread {
                format!("({}) ", thread::current().name().unwrap_or("unknown"))
            } else {
                "".to_string()
            };
            writeln!(
                buf,
                "{}{} - {} - {}",
                thread_name,
                record.level(),
                record.target(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info);

    if let Some(conf) = rust_log {
        builder.parse_filters(conf);
    }

    builder.init();
}

#[allow(dead_code)]
fn main() {
    println!("This is not an example");
}
