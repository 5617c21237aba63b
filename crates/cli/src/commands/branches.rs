//! List the store branches.

use tracing::info;

use minimart_admin::records::BackOffice;
use minimart_storefront::backend::BackendApi;
use minimart_storefront::state::AppState;

/// Fetch and print the branch list.
///
/// # Errors
///
/// Returns an error when the backend cannot be reached.
pub async fn run<B: BackendApi>(app: AppState<B>) -> Result<(), Box<dyn std::error::Error>> {
    let mut office = BackOffice::new();
    let branches = office.refresh_branches(app.backend()).await?;

    info!("{} branches", branches.len());
    for branch in branches {
        let address = branch.address.as_deref().unwrap_or("-");
        let phone = branch.phone.as_deref().unwrap_or("-");
        info!("  #{:<3} {:<30} {address}  {phone}", branch.id, branch.name);
    }

    Ok(())
}
