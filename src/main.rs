use anyhow::{Context, Result};
use nautilus_test_fixtures::solana_utils::verify_program_deployed;
use nautilus_test_fixtures::{
    ConfigPathProvider, FixedConfigPaths, Fixtures, HomeConfigPaths, TestProgram,
};
use solana_sdk::signature::Signer;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = cli::parse_args();

    let provider: Box<dyn ConfigPathProvider> = match &args.config_path {
        Some(path) => Box::new(FixedConfigPaths::from_config_file(path)),
        None => Box::new(HomeConfigPaths),
    };
    let config_path = provider.cli_config_path()?;

    let fixtures = Fixtures::load(&args.fixture_paths(), provider.as_ref())
        .with_context(|| format!("Failed to load fixtures using {}", config_path.display()))?;
    let config = &fixtures.config;

    println!(
        "\n\
        =============================\n\
        Nautilus test fixtures\n\
        =============================\n"
    );
    println!(
        "  CLI config: {}\n\
          RPC URL: {} ({})\n\
          Commitment: {:?}\n\
          Delay: {} seconds\n\
          Skip metadata: {}\n\
          Payer: {}",
        config_path.display(),
        config.json_rpc_url(),
        config.endpoint(),
        config.connection().commitment().commitment,
        config.delay().as_secs(),
        config.skip_metadata(),
        fixtures.payer.pubkey(),
    );
    for program in TestProgram::ALL {
        println!("  Program {}: {}", program, fixtures.program_id(program));
    }
    println!("-------------------------------------\n");

    if args.verify_programs {
        for (i, program) in TestProgram::ALL.into_iter().enumerate() {
            if i > 0 {
                config.sleep().await;
            }
            let program_id = fixtures.program_id(program);
            let account = verify_program_deployed(config.connection(), &program_id)
                .await
                .with_context(|| format!("Program {} is not deployed", program))?;
            println!(
                "Program {} deployed at {} (owner {})",
                program, program_id, account.owner
            );
        }
    }

    Ok(())
}
