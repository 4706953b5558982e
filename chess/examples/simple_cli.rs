// Simple command-line application to play chess with a friend

use kibitz::{board::PrettyStyle, notation::Style, Color, Game, Move, PromotePiece};
use std::io::{self, BufRead, Write};

fn parse_input(s: &str) -> Result<(Move, Option<PromotePiece>), String> {
    let (mv, promote) = match (s.get(..4), s.get(4..)) {
        (Some(mv), Some("")) => (mv, None),
        (Some(mv), Some(p)) if p.len() == 1 => (mv, Some(p)),
        _ => return Err("expected a move like \"e2e4\" or \"a7a8n\"".to_string()),
    };
    let mv: Move = mv.parse().map_err(|e| format!("{}", e))?;
    let promote = match promote {
        Some("q") => Some(PromotePiece::Queen),
        Some("r") => Some(PromotePiece::Rook),
        Some("b") => Some(PromotePiece::Bishop),
        Some("n") => Some(PromotePiece::Knight),
        Some(p) => return Err(format!("bad promote piece {:?}", p)),
        None => None,
    };
    Ok((mv, promote))
}

fn main() {
    let mut stdin = io::stdin().lock();

    let mut game = Game::initial();

    loop {
        println!("{}", game.board().pretty(PrettyStyle::Utf8));
        if game.is_check() {
            println!("Check!");
        }
        let side = match game.side() {
            Color::White => "White",
            Color::Black => "Black",
        };
        print!("{} move (\"quit\" to finish, \"undo\" to take back): ", side);
        io::stdout().flush().unwrap();
        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            break;
        }
        let s = s.trim();

        match s {
            "quit" => break,
            "undo" => {
                if game.pop().is_none() {
                    println!("Nothing to take back");
                }
                println!();
                continue;
            }
            _ => {}
        }

        let (mv, promote) = match parse_input(s) {
            Ok(res) => res,
            Err(e) => {
                println!("Bad move: {}", e);
                println!();
                continue;
            }
        };

        if let Err(e) = game.push(mv, promote) {
            println!("Cannot play {}: {}", mv, e);
            let dsts = game.legal_destinations(mv.src());
            if !dsts.is_empty() {
                let dsts: Vec<_> = dsts.iter().map(|c| c.to_string()).collect();
                println!("This piece can go to: {}", dsts.join(" "));
            }
        }

        println!();
    }

    println!("Notation:");
    println!("{}", game.notation_list(Style::Utf8));
    println!(
        "Material lost: White {}, Black {}",
        game.material_lost(Color::White),
        game.material_lost(Color::Black)
    );
}
