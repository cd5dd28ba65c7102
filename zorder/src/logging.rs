use env_logger::Builder;
use std::time::Instant;

/// Logs to stderr with the thread and the time elapsed since startup.
pub fn init_logging(verbose: bool) {
    use std::io::Write;

    let start = Instant::now();
    let mut builder = Builder::from_default_env();
    builder.format(move |buf, record| {
        writeln!(
            buf,
            "[{:?}] {:.2?} - {}: {}",
            std::thread::current().id(),
            Instant::now() - start,
            record.level(),
            record.args()
        )
    });
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}
