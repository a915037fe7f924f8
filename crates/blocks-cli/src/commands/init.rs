//! The `blocks init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("blocks.toml").exists() {
        println!("blocks.toml already exists, skipping.");
    } else {
        std::fs::write("blocks.toml", SAMPLE_CONFIG)?;
        println!("Created blocks.toml");
    }

    std::fs::create_dir_all("sets")?;
    let example_path = std::path::Path::new("sets/example.json");
    if example_path.exists() {
        println!("sets/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_SET)?;
        println!("Created sets/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit blocks.toml with your API token");
    println!("  2. Run: blocks validate --file sets/example.json");
    println!("  3. Run: blocks play --file sets/example.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# blocks configuration

api_url = "https://api.studyblocks.dev"
api_token = "${BLOCKS_API_TOKEN}"
leaderboard_limit = 5
"#;

const EXAMPLE_SET: &str = r#"{
  "ID": 1,
  "Title": "Science Basics",
  "PublicID": "example",
  "IsPublic": true,
  "Flashcards": [
    {"ID": 1, "Term": "Mitochondria", "Solution": "Organelle that produces ATP", "Concept": "Biology"},
    {"ID": 2, "Term": "Ribosome", "Solution": "Site of protein synthesis", "Concept": "Biology"},
    {"ID": 3, "Term": "Covalent bond", "Solution": "Shared electron pair", "Concept": "Chemistry"},
    {"ID": 4, "Term": "Mole", "Solution": "6.022e23 particles", "Concept": "Chemistry"},
    {"ID": 5, "Term": "Inertia", "Solution": "Resistance to change in motion", "Concept": "Physics"}
  ]
}
"#;
