//! Weather – Should We Play Outside?
//! =================================
//! Builds an ID3 tree from the classic fourteen-day weather table, prints
//! it, classifies a few days and shows which branches each decision took.
//! The highlighted tree of the last day is written as Graphviz DOT source.
//!
//! ```bash
//! cargo run --example weather
//! dot -Tpng weather.dot -o weather.png
//! ```

use id3_tree::dot::write_dot;
use id3_tree::{find_conflicts, read_table, ClassifierConfig, DecisionTreeClassifier, LoaderConfig};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let table = read_table("resources/weather.csv", &LoaderConfig::default())?;
    println!("Loaded {} days, predicting '{}'.", table.n_rows(), table.label_name());
    assert!(find_conflicts(&table).is_empty());

    let mut model = DecisionTreeClassifier::new(ClassifierConfig::default().set_parallel(true));
    model.fit(&table)?;
    println!("\n{}", model.tree);

    let days: [[&str; 4]; 3] = [
        ["Sunny", "Cool", "high", "False"],
        ["overcast", "Hot", "High", "True"],
        ["Rainy", "Mild", "Normal", "True"],
    ];
    let mut last_path = None;
    for day in &days {
        let (prediction, path) = model.predict(day);
        println!("{:<40} -> {:<4} via {}", day.join(", "), prediction, path);
        last_path = Some(path);
    }

    let (prediction, path) = model.predict(&["Foggy", "Mild", "Normal", "False"]);
    println!("Foggy day -> {} (path so far: '{}')", prediction, path);

    if let Some(path) = last_path {
        write_dot("weather.dot", &model.to_dot_highlighted(&path))?;
        println!("\nWrote weather.dot");
    }
    Ok(())
}
