use super::percent_bar::PercentBar;
use crate::{
    model::{Cell, Lookups, Resource},
    table::{PAGE_SIZES, TableAction, TableState},
};
use std::rc::Rc;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DataTableProps<R: Resource> {
    pub items: Rc<Vec<R>>,
    pub lookups: Rc<Lookups>,
    pub table: UseReducerHandle<TableState>,
    pub loading: bool,
    pub on_edit: Callback<R>,
    pub on_delete: Callback<R>,
}

#[function_component(DataTable)]
pub fn data_table<R: Resource>(
    DataTableProps {
        items,
        lookups,
        table,
        loading,
        on_edit,
        on_delete,
    }: &DataTableProps<R>,
) -> Html {
    let view = table.view::<R>(items, lookups);
    let page_ids: Vec<i64> = view.rows.iter().map(|row| row.id()).collect();
    let page_selected =
        !page_ids.is_empty() && page_ids.iter().all(|id| table.selected.contains(id));
    let column_count = R::columns().len() + 2;

    let header = R::columns().iter().enumerate().map(|(idx, column)| {
        if !column.sortable {
            return html! { <th>{ column.title }</th> };
        }
        let arrow = match table.sort {
            Some(sort) if sort.column == idx && sort.ascending => " ▲",
            Some(sort) if sort.column == idx => " ▼",
            _ => "",
        };
        let onclick = {
            let table = table.clone();
            Callback::from(move |_: MouseEvent| table.dispatch(TableAction::Sort(idx)))
        };
        html! { <th class="sortable" {onclick}>{ column.title }{ arrow }</th> }
    });

    let rows = view.rows.iter().map(|row| {
        let id = row.id();
        let toggle = {
            let table = table.clone();
            Callback::from(move |_: Event| table.dispatch(TableAction::ToggleRow(id)))
        };
        let edit = {
            let on_edit = on_edit.clone();
            let row = (*row).clone();
            Callback::from(move |_: MouseEvent| on_edit.emit(row.clone()))
        };
        let delete = {
            let on_delete = on_delete.clone();
            let row = (*row).clone();
            Callback::from(move |_: MouseEvent| on_delete.emit(row.clone()))
        };
        html! {
            <tr key={id}>
                <td class="select-cell">
                    <input type="checkbox" checked={table.selected.contains(&id)} onchange={toggle} />
                </td>
                { for (0..R::columns().len()).map(|column| render_cell(row.cell(column, lookups))) }
                <td class="actions-cell">
                    <button class="button-outline button-small" onclick={edit}>{"Modifier"}</button>
                    <button class="button-danger button-small" onclick={delete}>{"Supprimer"}</button>
                </td>
            </tr>
        }
    });

    let toggle_page = {
        let table = table.clone();
        let page_ids = page_ids.clone();
        Callback::from(move |_: Event| table.dispatch(TableAction::TogglePage(page_ids.clone())))
    };
    let on_per_page = {
        let table = table.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            if let Ok(per_page) = value.parse() {
                table.dispatch(TableAction::PerPage(per_page));
            }
        })
    };
    let go_to = |page: usize| {
        let table = table.clone();
        Callback::from(move |_: MouseEvent| table.dispatch(TableAction::Page(page)))
    };
    let first_shown = if view.total == 0 {
        0
    } else {
        view.page * table.per_page + 1
    };
    let last_shown = view.page * table.per_page + view.rows.len();

    html! {
        <div class="data-table">
            <table>
                <thead>
                    <tr>
                        <th class="select-cell">
                            <input type="checkbox" checked={page_selected} onchange={toggle_page}
                                aria-label="Sélectionner la page" />
                        </th>
                        { for header }
                        <th>{"Actions"}</th>
                    </tr>
                </thead>
                <tbody>
                    if view.rows.is_empty() {
                        <tr>
                            <td class="empty-cell" colspan={column_count.to_string()}>
                                { if *loading { "Chargement…" } else { "Aucune donnée" } }
                            </td>
                        </tr>
                    } else {
                        { for rows }
                    }
                </tbody>
            </table>
            <div class="pagination">
                <label>
                    {"Lignes par page "}
                    <select onchange={on_per_page}>
                        { for PAGE_SIZES.iter().map(|size| html! {
                            <option value={size.to_string()} selected={*size == table.per_page}>
                                { size }
                            </option>
                        }) }
                    </select>
                </label>
                <span>{ format!("{first_shown}-{last_shown} sur {}", view.total) }</span>
                <button class="button-outline button-small" disabled={view.page == 0}
                    onclick={go_to(view.page.saturating_sub(1))}>{"‹"}</button>
                <span>{ format!("{} / {}", view.page + 1, view.page_count) }</span>
                <button class="button-outline button-small" disabled={view.page + 1 >= view.page_count}
                    onclick={go_to(view.page + 1)}>{"›"}</button>
            </div>
        </div>
    }
}

fn render_cell(cell: Cell) -> Html {
    match cell {
        Cell::Percent(value) => html! { <td><PercentBar {value} /></td> },
        Cell::Number(_) | Cell::Money(_) => html! { <td class="numeric">{ cell.display() }</td> },
        Cell::Text(_) | Cell::Date(_) => html! { <td>{ cell.display() }</td> },
    }
}
