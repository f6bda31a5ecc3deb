/// Computer-vs-computer game driven through the turn flow
///
/// The "human" seat is played by the random engine and the computer seat by
/// whatever REVERSI_DIFFICULTY selects. Set RUST_LOG=info to see each move.
///
///     cargo run -p reversi_rust --example self_play
use rand::rngs::StdRng;
use rand::SeedableRng;
use reversi_engines::compute_move;
use reversi_rust::{Difficulty, Game, GameConfig, Phase};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = GameConfig::from_env()?;
    let mut game = Game::new(config.human_side);
    let mut rng = StdRng::seed_from_u64(2024);

    println!("=== Reversi self-play ===");
    println!(
        "human seat: {} (random), computer seat: {} ({})\n",
        game.human_side(),
        game.computer_side(),
        config.difficulty
    );
    print!("{}", game.board());

    loop {
        let applied = match game.phase() {
            Phase::WaitingForHuman => {
                let mv = compute_move(game.board(), game.to_move(), Difficulty::Easy, &mut rng)
                    .ok_or("human seat has no move")?;
                game.play_human(mv.row, mv.col)?.clone()
            }
            Phase::ComputerThinking => game.play_computer(config.difficulty, &mut rng)?.clone(),
            Phase::Animating => unreachable!("every move is settled below"),
            Phase::GameOver(outcome) => {
                let (black, white) = game.board().get_piece_counts();
                println!("Game over: black {}, white {}", black, white);
                match outcome.winner() {
                    Some(side) => println!("{} wins", side),
                    None => println!("draw"),
                }
                return Ok(());
            }
        };

        let order: Vec<String> = applied
            .flips
            .iter()
            .map(|f| format!("({},{})", f.row, f.col))
            .collect();
        println!(
            "{} -> ({}, {}) flips {}",
            applied.side,
            applied.row,
            applied.col,
            order.join(" ")
        );

        game.settle()?;
        if let Some(skipped) = game.last_skipped() {
            println!("{} has no move and passes", skipped);
        }
        print!("{}", game.board());
    }
}
