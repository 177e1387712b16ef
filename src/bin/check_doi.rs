use clap::Parser;
use doi_prefixes::utils::logger;
use doi_prefixes::PrefixLexicon;

#[derive(Parser)]
#[command(name = "check_doi")]
#[command(about = "Check DOIs against a DataCite prefix lexicon")]
struct Args {
    /// Prefix file produced by doi-prefixes
    #[arg(short, long, default_value = "resources/lexicon/doiPrefixes.txt")]
    lexicon: String,

    /// DOIs or https://doi.org/ links
    #[arg(required = true)]
    dois: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let lexicon = match PrefixLexicon::from_file(&args.lexicon) {
        Ok(lexicon) => lexicon,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    for doi in &args.dois {
        println!("{}\t{}", doi, lexicon.is_dataset_doi(doi));
    }
}
