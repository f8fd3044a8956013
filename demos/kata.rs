//! Toy Robot Kata
//!
//! Reads kata commands from stdin, one per line, and prints the answer to
//! every REPORT. Unparseable lines are reported on stderr and skipped.
//!
//! Key concepts:
//! - Textual commands parsed with `FromStr`
//! - Commands that would drop the robot off the table are ignored
//! - `REPORT` before the first `PLACE` prints `ROBOT MISSING`
//!
//! Run with: cargo run --example kata < commands.txt
//!
//! ```text
//! PLACE 0,0,NORTH
//! MOVE
//! RIGHT
//! MOVE
//! REPORT
//! ```
//!
//! prints `1,0,EAST`. Row 0 is the top edge, so the first MOVE is ignored.

use std::io::{self, BufRead};
use toy_robot::machine::{Command, CommandOutcome, RobotStateMachine};

fn main() {
    let mut robot = RobotStateMachine::new();

    for (number, line) in io::stdin().lock().lines().enumerate() {
        let line = line.expect("failed to read stdin");
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                if let CommandOutcome::Reported { report } = robot.execute(command) {
                    println!("{}", report);
                }
            }
            Err(err) => eprintln!("line {}: {}", number + 1, err),
        }
    }
}
