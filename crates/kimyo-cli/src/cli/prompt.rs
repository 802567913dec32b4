use kimyo_cms::{ConfirmDialog, Decision};
use std::io::{self, BufRead, Write};

/// Renders a confirmation dialog on the terminal. Destructive dialogs
/// require the full word "yes"; everything else accepts "y".
pub(crate) fn confirm(dialog: &ConfirmDialog, assume_yes: bool) -> io::Result<Decision> {
    println!("{}", dialog.title);
    println!("{}", dialog.body);
    if assume_yes {
        return Ok(Decision::Confirmed);
    }

    let question = if dialog.danger {
        "Type 'yes' to continue: "
    } else {
        "Continue? [y/N] "
    };
    print!("{question}");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    let confirmed = if dialog.danger {
        answer == "yes"
    } else {
        answer == "y" || answer == "yes"
    };
    Ok(if confirmed {
        Decision::Confirmed
    } else {
        Decision::Dismissed
    })
}
