// sudo apt-get install fonts-roboto libssl-dev
extern crate anyhow;
extern crate flexi_logger;
extern crate getopts;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod arrivals;
mod clock;
mod config;
mod display;
mod drawing;
mod lines;
mod razza;
mod result;
mod ridepath;
mod scheduler;
mod structs;
mod webclient;

fn start_logger(log_dir: Option<String>) -> result::PathDashResult<flexi_logger::LoggerHandle> {
    let logger = flexi_logger::Logger::try_with_env_or_str("info")?;
    let logger = match log_dir {
        Some(dir) => {
            logger
                .log_to_file(flexi_logger::FileSpec::default().directory(dir))
                .rotate(flexi_logger::Criterion::Size(1 << 20),
                        flexi_logger::Naming::Numbers,
                        flexi_logger::Cleanup::KeepLogFiles(5))
                .duplicate_to_stderr(flexi_logger::Duplicate::Info)
        },
        None => logger.log_to_stderr(),
    };
    return Ok(logger.format(flexi_logger::detailed_format).start()?);
}

fn run(matches: &getopts::Matches) -> result::PathDashResult<()> {
    let config = config::load_config(matches.opt_str("config"))?;
    let skip_display = matches.opt_present("skip-display");
    let one_shot = matches.opt_present("one-shot");
    let png_out = matches.opt_str("save-image").map(std::path::PathBuf::from);

    info!("Running. display={} one-shot={} station={}/{} fallback={}/{}",
          !skip_display, one_shot,
          config.ridepath.station, config.ridepath.direction,
          config.razza.station, config.razza.direction);

    let lines = config.line_table();
    let http = webclient::WebClient::new(config.http_timeout())?;
    let clock = clock::AdafruitClock::new(
        &http, &config.clock.base_url, &config.clock.username, &config.clock.key, &config.clock.timezone);
    let primary = ridepath::RidePathSource::new(
        &http, &lines, &config.ridepath.url, &config.ridepath.station, &config.ridepath.direction);
    let secondary = razza::RazzaSource::new(
        &http, &clock, &lines, &config.razza.base_url, &config.razza.station, &config.razza.direction);
    let feed = arrivals::FallbackArrivals::new(&primary, &secondary);

    let mut screen: Box<dyn display::Screen> = if skip_display {
        if png_out.is_some() {
            warn!("--save-image has no effect with --skip-display");
        }
        Box::new(display::LogScreen::new(&config.display))
    } else {
        Box::new(display::MatrixScreen::new(&config.display, png_out)?)
    };

    let mut scheduler = scheduler::Scheduler::new(scheduler::Intervals {
        normal: std::time::Duration::from_secs(config.poll.normal_interval_secs),
        degraded: std::time::Duration::from_secs(config.poll.degraded_interval_secs),
    });

    if one_shot {
        scheduler.show(screen.as_mut());
        scheduler.poll(&feed, screen.as_mut());
        info!("One-shot poll done: {:?} {:?}", scheduler.state(), scheduler.display_state());
        return Ok(());
    }

    scheduler.run(&feed, screen.as_mut());
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = getopts::Options::new();
    opts.optopt("c", "config", "JSON config file (defaults apply when omitted).", "FILENAME");
    opts.optflag("d", "skip-display", "log arrivals instead of drawing the matrix");
    opts.optflag("o", "one-shot", "poll once and exit");
    opts.optopt("i", "save-image", "Where to put a png of each frame.", "FILENAME");
    opts.optopt("l", "log-dir", "Write rotating log files here.", "DIR");
    opts.optflag("h", "help", "print this help");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(err) => {
            eprintln!("{}\n{}", err, opts.usage(&format!("Usage: {} [options]", args[0])));
            std::process::exit(2);
        },
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&format!("Usage: {} [options]", args[0])));
        return;
    }

    let _logger = match start_logger(matches.opt_str("log-dir")) {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("Could not start logging: {:?}", err);
            std::process::exit(1);
        },
    };

    if let Err(err) = run(&matches) {
        error!("{:?}", err);
        std::process::exit(1);
    }
}
