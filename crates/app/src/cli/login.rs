use std::io::Write;

use crate::{config::CredentialsConfig, context::AppContext, errors::AppError};

pub(crate) fn run(
    context: &AppContext,
    credentials: &CredentialsConfig,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let user = context.sign_in(credentials)?;

    writeln!(out, "Signed in as {} ({})", user.username, user.role)?;
    writeln!(out, "Dashboard: {}", user.role.dashboard())?;

    Ok(())
}
