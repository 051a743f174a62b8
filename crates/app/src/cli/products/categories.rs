use std::io::Write;

use crate::{context::AppContext, errors::AppError};

pub(crate) fn run(context: &AppContext, out: &mut impl Write) -> Result<(), AppError> {
    let (catalogue, _) = context.open_catalogue()?;

    for category in catalogue.categories() {
        writeln!(out, "{category}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::cli::tests::{run_in, seeded_dir};

    #[test]
    fn lists_categories_once_in_file_order() -> TestResult {
        let dir = seeded_dir()?;

        let out = run_in(&dir, &["products", "categories", "-u", "alice", "-p", "pw"])?;

        assert_eq!(out, "Dairy\nBakery\n");

        Ok(())
    }
}
