use clap::Parser;
use equipment_tally::{analysis, cli, config, error, explainer, export, importer, report};
use cli::{Cli, Commands, OutputFormat};
use config::Config;
use equipment_tally_common::{
    columns::{action_columns, description_columns},
    select_search_columns, CountingMode, TallyOptions,
};
use error::Result;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        if e.is_input_unavailable() {
            eprintln!("⚠ {}", e);
        } else {
            eprintln!("エラー: {}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            input,
            data_dir,
            keywords,
            highlight,
            distinct,
            sample_size,
            format,
            output,
            excel,
        } => {
            let config = Config::load()?;
            let data_dir = match data_dir {
                Some(dir) => Some(dir),
                None if input.is_none() => Some(config.data_dir()?),
                None => None,
            };

            let request = analysis::AnalysisRequest {
                input,
                data_dir,
                keywords_path: keywords.or_else(|| config.keywords_path.clone()),
                options: TallyOptions {
                    mode: if distinct {
                        CountingMode::DistinctRecords
                    } else {
                        CountingMode::Occurrences
                    },
                    sample_size: sample_size.unwrap_or(config.sample_size),
                },
            };

            let analysis = analysis::run_analysis(&request)?;
            let highlight = highlight.unwrap_or_else(|| config.highlight.clone());

            let rendered = match format {
                OutputFormat::Text => {
                    let mut text = format!("対象ファイル: {}\n", analysis.source);
                    text.push_str(&report::render_text(
                        &analysis.result,
                        &analysis.diagnosis,
                        &highlight,
                    ));
                    text
                }
                OutputFormat::Json => {
                    let report = report::TallyReport::new(
                        &analysis.source,
                        &analysis.result,
                        &analysis.diagnosis,
                    );
                    serde_json::to_string_pretty(&report)?
                }
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    println!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", rendered.trim_end()),
            }

            if let Some(path) = excel {
                export::export_excel(&analysis.result, &path)?;
                println!("✔ Excel出力: {}", path.display());
            }
        }

        Commands::Columns { input } => {
            let dataset = importer::load_dataset(&input)?;
            println!("列:         {}", dataset.columns.join(", "));
            println!("作業列:     {}", action_columns(&dataset.columns).join(", "));
            println!("説明列:     {}", description_columns(&dataset.columns).join(", "));
            println!(
                "検索列:     {}",
                select_search_columns(&dataset.columns).join(", ")
            );
        }

        Commands::Keywords { keywords } => {
            let config = Config::load()?;
            let path = keywords.or_else(|| config.keywords_path.clone());
            let table = analysis::load_keyword_table(path.as_deref())?;
            for entry in table.entries() {
                println!("{:<16} {}", entry.label, entry.keywords.join(", "));
            }
            let overlaps = table.overlapping_keywords();
            if !overlaps.is_empty() {
                println!("\n重複するキーワード（1つのセルで両方に一致する）:");
                for overlap in overlaps {
                    println!(
                        "  {}: \"{}\" ⊂ \"{}\"",
                        overlap.equipment_type, overlap.shorter, overlap.longer
                    );
                }
            }
        }

        Commands::Explain => {
            print!("{}", explainer::narrative());
        }

        Commands::Config { set_data_dir, show } => {
            let mut config = Config::load()?;

            if let Some(dir) = set_data_dir {
                config.set_data_dir(dir)?;
                println!("✔ 取り込みフォルダを設定しました");
            }

            if show {
                println!("設定:");
                println!("  取り込みフォルダ: {}", config.data_dir()?.display());
                println!(
                    "  キーワード表: {}",
                    config
                        .keywords_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".into())
                );
                println!("  明細表示: {}", config.highlight);
                println!("  サンプル件数: {}", config.sample_size);
            }
        }
    }

    Ok(())
}
