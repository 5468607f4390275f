//! 件数差異の説明を表示する（実データは読まない）

use std::io::Write;

fn main() -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(equipment_tally::explainer::narrative().as_bytes())?;
    stdout.flush()?;
    Ok(())
}
