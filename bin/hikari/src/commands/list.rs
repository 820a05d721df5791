use clap::Parser;
use clap_handler::handler;

use super::default_extractors;

/// List available extractors and the arguments they accept
#[derive(Parser, Clone, Default)]
#[clap(name = "list", short_flag = 'L')]
pub struct ListCommand {}

#[handler(ListCommand)]
async fn handle_list(_this: ListCommand) -> anyhow::Result<()> {
    for entry in default_extractors() {
        println!("{}", entry.id);
        for line in &entry.help {
            println!("  {line}");
        }

        if !entry.arguments.is_empty() {
            println!();
            println!("  Arguments:");
            for argument in &entry.arguments {
                match argument.env {
                    Some(env) => println!("  -e {}=<value> (env: {env})", argument.name),
                    None => println!("  -e {}=<value>", argument.name),
                }
                println!("      {}", argument.help);
            }
        }
    }

    Ok(())
}
