// Saju Engine - Command Line
// `saju analyze` prints a full chart, `saju year` prints one annual pillar

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use saju_engine::{
    BirthInput, CalendarConverter, CalendarType, CycleEngine, SajuAnalysis, SajuAnalyzer,
    SajuConfig, Stem, TimeSlot, VERSION,
};

#[derive(Parser)]
#[command(name = "saju")]
#[command(version = VERSION)]
#[command(about = "Four Pillars birth chart calculator")]
struct Cli {
    /// Config file (overrides SAJU_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Lunar month table (overrides the config file)
    #[arg(long, global = true)]
    lunar_table: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a full chart for one birth
    Analyze(AnalyzeArgs),
    /// Show the pillar of a calendar year
    Year {
        year: i32,
        /// Day master stem (e.g. gap, 갑, 甲) for the year reading
        #[arg(long)]
        day_master: Option<Stem>,
    },
}

#[derive(clap::Args)]
struct AnalyzeArgs {
    /// Birth date, YYYY-MM-DD
    #[arg(long)]
    date: String,

    #[arg(long, value_enum, default_value_t = CalendarArg::Solar)]
    calendar: CalendarArg,

    /// Lunar date falls in a leap month
    #[arg(long)]
    leap: bool,

    /// Time slot token (ja, chuk, in, ... hae) or "unknown"
    #[arg(long, default_value = "unknown", conflicts_with = "hour")]
    slot: String,

    /// Clock hour of birth (0-23), converted to its time slot
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
    hour: Option<u32>,

    /// male or female
    #[arg(long)]
    gender: String,

    /// Year for the annual reading and Korean age (default: this year)
    #[arg(long)]
    reference_year: Option<i32>,

    /// Age for the current-cycle lookup (default: Korean age)
    #[arg(long)]
    age: Option<i32>,

    #[arg(long)]
    name: Option<String>,

    /// Number of fortune cycles (overrides the config file)
    #[arg(long)]
    cycles: Option<usize>,

    /// Print JSON instead of the human-readable chart
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CalendarArg {
    Solar,
    Lunar,
}

impl From<CalendarArg> for CalendarType {
    fn from(arg: CalendarArg) -> Self {
        match arg {
            CalendarArg::Solar => CalendarType::Solar,
            CalendarArg::Lunar => CalendarType::Lunar,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut config = match &cli.config {
        Some(path) => SajuConfig::from_file(path)?,
        None => SajuConfig::from_env()?,
    };
    if let Some(path) = cli.lunar_table {
        config.lunar_table = Some(path);
    }

    match cli.command {
        Commands::Analyze(args) => {
            if let Some(cycles) = args.cycles {
                config.cycle_count = cycles;
            }
            config.validate()?;
            run_analyze(&config, args)
        }
        Commands::Year { year, day_master } => run_year(&config, year, day_master),
    }
}

fn build_analyzer(config: &SajuConfig) -> Result<SajuAnalyzer<Box<dyn CalendarConverter>>> {
    let calendar = config.calendar()?;
    Ok(SajuAnalyzer::with_cycle_engine(
        calendar,
        CycleEngine::with_cycle_count(config.cycle_count),
    ))
}

fn run_analyze(config: &SajuConfig, args: AnalyzeArgs) -> Result<()> {
    let analyzer = build_analyzer(config)?;
    let reference_year = args.reference_year.unwrap_or_else(|| Local::now().year());
    let time_slot = match args.hour {
        Some(hour) => TimeSlot::from_hour(hour).token().to_string(),
        None => args.slot,
    };

    let input = BirthInput {
        birth_date: args.date,
        calendar_type: args.calendar.into(),
        is_leap_month: args.leap,
        time_slot: Some(time_slot),
        gender: Some(args.gender),
        name: args.name,
    };

    let analysis = analyzer
        .analyze(&input, reference_year, args.age)
        .with_context(|| format!("Failed to analyze birth date {}", input.birth_date))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis, reference_year);
    }

    Ok(())
}

fn run_year(config: &SajuConfig, year: i32, day_master: Option<Stem>) -> Result<()> {
    let analyzer = build_analyzer(config)?;
    let lookup = analyzer.year_lookup(year, day_master);

    println!("📆 {} - {} ({})", lookup.year, lookup.pillar, lookup.pillar.hanja());
    println!(
        "   {} {} / {} {}",
        lookup.pillar.stem.romanized(),
        lookup.pillar.element,
        lookup.pillar.branch.animal(),
        lookup.pillar.branch_element
    );

    if let Some(fortune) = lookup.fortune {
        for sentence in fortune.narrative {
            println!("   {}", sentence);
        }
    }

    Ok(())
}

fn print_analysis(analysis: &SajuAnalysis, reference_year: i32) {
    let title = analysis.name.as_ref().map(|n| format!(" - {}", n)).unwrap_or_default();
    println!("🔮 Saju Chart{}", title);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "📅 Solar: {}  Gender: {}  Time: {}",
        analysis.solar_date, analysis.gender, analysis.time_slot
    );
    if let Some(lunar) = analysis.lunar_date {
        println!("🌙 Lunar: {}", lunar);
    }

    println!("\n🏛️  Pillars: {}", analysis.ganji);
    for (position, pillar) in analysis.chart.pillars() {
        println!(
            "   {:<6} {} ({})  {} / {}",
            format!("{:?}", position),
            pillar,
            pillar.hanja(),
            pillar.element,
            pillar.branch_element
        );
    }

    let profile = &analysis.ten_gods.profile;
    println!(
        "\n☀️  Day master: {} ({} {})",
        analysis.day_master, profile.polarity, profile.element
    );
    println!("   {}", profile.description);
    println!("   {}", profile.element_description);

    println!("\n⚖️  Elements ({} positions)", analysis.elements.total);
    for count in &analysis.elements.ranking {
        println!("   {:<6} {}", count.element.to_string(), "●".repeat(count.count as usize));
    }
    if !analysis.elements.missing.is_empty() {
        let missing: Vec<String> =
            analysis.elements.missing.iter().map(|e| e.to_string()).collect();
        println!("   Missing: {}", missing.join(", "));
    }

    println!("\n👥 Ten Gods");
    for count in &analysis.ten_gods.dominant.ranking {
        println!("   {:<10} {}", count.category.to_string(), count.count);
    }
    for sentence in &analysis.ten_gods.traits {
        println!("   ✓ {}", sentence);
    }

    let fortune = &analysis.fortune;
    println!(
        "\n🔄 Fortune cycles ({:?}, from age {})",
        fortune.direction, fortune.start_age
    );
    for cycle in &fortune.cycles {
        let marker = if fortune.current.as_ref() == Some(cycle) {
            "▶"
        } else {
            " "
        };
        println!("   {} {:>3}-{:<3} {}", marker, cycle.start_age, cycle.end_age, cycle.pillar);
    }

    let year = &fortune.year_fortune;
    println!("\n📆 {} ({}), age {}", reference_year, year.pillar, fortune.age);
    for sentence in &year.narrative {
        println!("   {}", sentence);
    }
}
