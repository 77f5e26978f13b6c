//! id3: build ID3 decision trees from delimited text files and classify with them.

use clap::{Args, Parser, Subcommand};
use id3_tree::dot::write_dot;
use id3_tree::utils::items_to_strings;
use id3_tree::{
    find_conflicts, read_table, ClassifierConfig, DecisionPath, DecisionTreeClassifier, Id3Error, LoaderConfig,
    ModelIO,
};
use log::{error, info, warn};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "id3")]
#[command(about = "ID3 decision trees on categorical data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a tree from a dataset and print it
    Tree {
        #[command(flatten)]
        load: LoadArgs,

        /// Write the tree as Graphviz DOT source
        #[arg(long)]
        dot: Option<PathBuf>,

        /// Save the fitted classifier as JSON
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Build a tree from a dataset and classify inputs with it
    Predict {
        #[command(flatten)]
        load: LoadArgs,

        /// Feature values in header order; prompts interactively when omitted
        #[arg(long, value_delimiter = ',')]
        values: Option<Vec<String>>,

        /// Write the tree with the decision path highlighted as Graphviz DOT source
        #[arg(long)]
        dot: Option<PathBuf>,
    },
}

#[derive(Args)]
struct LoadArgs {
    /// Delimited text file, header first and the label in the last column
    dataset: PathBuf,

    /// Field delimiter, detected from the header when omitted
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Lowercase every value while loading
    #[arg(long)]
    lowercase: bool,

    /// Threads used for parallel gain evaluation
    #[arg(short, long)]
    threads: Option<usize>,

    /// Evaluate candidate features in parallel
    #[arg(long)]
    parallel: bool,

    /// Abort when records with equal features carry different labels
    #[arg(long)]
    strict: bool,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Tree { load, dot, save } => cmd_tree(&load, dot.as_deref(), save.as_deref()),
        Commands::Predict { load, values, dot } => cmd_predict(&load, values, dot.as_deref()),
    };
    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn fit_classifier(load: &LoadArgs) -> Result<DecisionTreeClassifier, Id3Error> {
    let loader = LoaderConfig::default()
        .set_delimiter(load.delimiter)
        .set_lowercase_values(load.lowercase);
    let table = read_table(&load.dataset, &loader)?;
    info!(
        "Loaded {} rows with {} features from {}.",
        table.n_rows(),
        table.n_features(),
        load.dataset.display()
    );

    let conflicts = find_conflicts(&table);
    if !conflicts.is_empty() {
        if load.strict {
            return Err(Id3Error::InvalidParameter(
                "dataset".to_string(),
                "records without conflicting labels".to_string(),
                format!("{} conflict(s)", conflicts.len()),
            ));
        }
        warn!(
            "{} conflicting record(s), their leaves use the majority label.",
            conflicts.len()
        );
    }

    let cfg = ClassifierConfig::default()
        .set_num_threads(load.threads)
        .set_parallel(load.parallel)
        .set_verbose(true);
    let mut model = DecisionTreeClassifier::new(cfg);
    model.fit(&table)?;
    Ok(model)
}

fn cmd_tree(load: &LoadArgs, dot: Option<&Path>, save: Option<&Path>) -> Result<(), Id3Error> {
    let model = fit_classifier(load)?;
    print!("{}", model.tree);
    if let Some(path) = dot {
        write_dot(path, &model.to_dot())?;
        info!("Wrote DOT source to {}.", path.display());
    }
    if let Some(path) = save {
        model.save_model(path)?;
        info!("Saved classifier to {}.", path.display());
    }
    Ok(())
}

fn cmd_predict(load: &LoadArgs, values: Option<Vec<String>>, dot: Option<&Path>) -> Result<(), Id3Error> {
    let model = fit_classifier(load)?;
    let mut path = DecisionPath::new();

    if let Some(values) = values {
        let expected = model.feature_names().len();
        if values.len() != expected {
            return Err(Id3Error::InvalidParameter(
                "values".to_string(),
                format!("{} value(s)", expected),
                values.len().to_string(),
            ));
        }
        return report(&model, &values, &mut path, dot);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    println!("Enter a value for each feature, or 'exit' to quit.");
    loop {
        let mut input = Vec::with_capacity(model.vocabulary.len());
        for (name, known) in &model.vocabulary {
            print!("{} [{}]: ", name, items_to_strings(known.as_slice()));
            io::stdout()
                .flush()
                .map_err(|e| Id3Error::UnableToWrite(e.to_string()))?;
            let line = match lines.next() {
                Some(line) => line.map_err(|e| Id3Error::UnableToRead(e.to_string()))?,
                None => return Ok(()),
            };
            if line.trim().eq_ignore_ascii_case("exit") {
                return Ok(());
            }
            input.push(line);
        }
        report(&model, &input, &mut path, dot)?;
    }
}

fn report(
    model: &DecisionTreeClassifier,
    input: &[String],
    path: &mut DecisionPath,
    dot: Option<&Path>,
) -> Result<(), Id3Error> {
    let prediction = model.predict_into(input, path);
    if prediction.is_unknown() {
        println!("Prediction: {} (a value was not seen during training)", prediction);
    } else {
        println!("Prediction: {}", prediction);
    }
    println!("Path: {}", path);
    if let Some(file) = dot {
        write_dot(file, &model.to_dot_highlighted(path))?;
        info!("Wrote highlighted DOT source to {}.", file.display());
    }
    Ok(())
}
