use leptos::prelude::*;

use crate::browser;
use crate::state::DashboardState;
use crate::workflow::{self, TableBody};

/// Configuration table with per-row edit and delete actions.
#[component]
pub fn ConfigTable(state: DashboardState) -> impl IntoView {
    let body = move || match state.configs.with(|configs| TableBody::from_configs(configs)) {
        TableBody::Placeholder => view! {
            <tr>
                <td colspan=workflow::TABLE_COLUMNS.to_string() class="text-center">
                    {workflow::EMPTY_TABLE}
                </td>
            </tr>
        }
        .into_any(),
        TableBody::Rows(rows) => rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                view! {
                    <tr>
                        <td>{row.name}</td>
                        <td><code>{row.secret_id}</code></td>
                        <td>{row.zone_id}</td>
                        <td>{row.region}</td>
                        <td>{browser::locale_time(&row.updated_at)}</td>
                        <td>
                            <button
                                type="button"
                                class="btn btn-primary btn-sm"
                                on:click=move |_| state.open_edit(id)
                            >
                                "Edit"
                            </button>
                            " "
                            <button
                                type="button"
                                class="btn btn-danger btn-sm"
                                on:click=move |_| state.delete(id)
                            >
                                "Delete"
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
            .into_any(),
    };

    view! {
        <table>
            <thead>
                <tr>
                    <th>"Name"</th>
                    <th>"SecretId"</th>
                    <th>"Zone ID"</th>
                    <th>"Region"</th>
                    <th>"Updated"</th>
                    <th>"Actions"</th>
                </tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}
