use super::{AccountAction, AppContext};
use crate::types::errors::AppResult;

pub fn account(ctx: &AppContext, action: AccountAction) -> AppResult<()> {
    let store = ctx.credential_store();
    match action {
        AccountAction::Show => match store.load() {
            Some((creds, source)) => println!("Logged in as {} ({source})", creds.username),
            None => println!("No stored credentials"),
        },
        AccountAction::Clear => {
            store.clear()?;
            println!("Credentials cleared");
        }
    }
    Ok(())
}
