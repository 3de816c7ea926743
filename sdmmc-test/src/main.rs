use clap::Parser;
use log::{error, info};
use sdmmc::bus::{self, linux};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Specify SPI device
    #[clap(short, long, value_parser)]
    spi: String,

    /// Specify chip-select GPIO number
    #[clap(short, long, value_parser)]
    cs: u16,

    /// SPI clock during bring-up, in Hz
    #[clap(long, value_parser, default_value_t = 400_000)]
    speed: u32,
}

fn run() -> Result<u8, String> {
    let args = Args::parse();
    let mut bus = linux::spi(&args.spi, args.cs, args.speed).map_err(|e| e.to_string())?;
    let result = bus.init();
    let code = bus::status_code(&result);
    if let Err(e) = result {
        error!("Bring-up failed at {:?}: {:?}", e.step, e.cause);
        return Ok(code);
    }
    let ocr = bus.read_ocr().map_err(|e| format!("{:?}", e))?;
    info!("OCR {:?}", ocr);
    println!("Card: {:?}", sdmmc::Card::from(ocr));
    Ok(code)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    match run() {
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            println!("{}", e);
            std::process::exit(-1)
        }
    }
}
