use randsuite_core::{RandomnessTest, Summary, SuiteConfig};

use crate::generators::GENERATORS;

pub fn run() {
    let config = SuiteConfig::default();

    println!("Tests ({}):\n", RandomnessTest::NAMES.len());
    for name in RandomnessTest::NAMES {
        if let Ok(test) = RandomnessTest::from_name(name, &config) {
            println!("  {:<20} {}", test.name(), test.description());
        }
    }

    println!("\nSummaries ({}):\n", Summary::NAMES.len());
    for name in Summary::NAMES {
        if let Ok(summary) = Summary::from_name(name) {
            println!("  {:<20} {}", summary.name(), summary.description());
        }
    }

    println!("\nGenerators ({}):\n", GENERATORS.len());
    for (name, description) in GENERATORS {
        println!("  {name:<20} {description}");
    }
}
