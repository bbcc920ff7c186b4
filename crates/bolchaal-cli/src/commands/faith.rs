use clap::Subcommand;

use bolchaal_core::{substitute, Config, FaithTradition};

#[derive(Subcommand)]
pub enum FaithAction {
    /// Rewrite text into a tradition's vocabulary
    Substitute {
        /// Text to rewrite
        text: String,
        /// Tradition (hindu, muslim, christian); defaults to learner.faith
        #[arg(long)]
        tradition: Option<String>,
    },
    /// List supported traditions
    List,
}

pub fn run(action: FaithAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        FaithAction::Substitute { text, tradition } => {
            let tradition = match tradition {
                Some(name) => name.parse::<FaithTradition>()?,
                None => Config::load_or_default().learner.faith,
            };
            println!("{}", substitute(&text, tradition));
        }
        FaithAction::List => {
            for tradition in FaithTradition::ALL {
                println!("{tradition}");
            }
        }
    }
    Ok(())
}
