use bingolink_core::{BoardState, Cell, CellIndex, LoadError, StateStore};
use clap::Args;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use crate::clipboard::copy_text;
use crate::url_store::UrlStore;
use crate::utils::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Toggle(CellIndex),
    Shuffle,
    Edit,
    UpdateDraft(String),
    CreateBoard,
    Share,
    Shared(bool),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    position: CellIndex,
    text: Option<AttrValue>,
    marked: bool,
    callback: Callback<Msg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        position,
        text,
        marked,
        callback,
    } = props.clone();

    let mut class = classes!("cell");
    if marked {
        class.push("marked");
    }

    match text {
        None => html! {
            <td class={classes!(class, "free")}>{"FREE"}</td>
        },
        Some(text) => {
            let onclick = Callback::from(move |_: MouseEvent| {
                log::trace!("cell {} clicked", position);
                callback.emit(Msg::Toggle(position));
            });
            html! {
                <td {class} {onclick}>{text.as_str()}</td>
            }
        }
    }
}

#[derive(Args, Properties, Debug, Clone, Default, PartialEq)]
pub(crate) struct BoardProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct BoardView {
    store: UrlStore,
    board: Option<BoardState>,
    draft: String,
    load_error: Option<String>,
    shared: Option<bool>,
    seeds: SeedSource,
}

impl BoardView {
    fn commit(&mut self) {
        if let Some(board) = &self.board {
            board.save(&mut self.store);
        } else {
            self.store.write(&Default::default());
        }
    }

    fn create_board(&mut self) -> bool {
        let content = parse_draft(&self.draft);
        let seed = self.seeds.next();
        match BoardState::new(content, seed) {
            Ok(board) => {
                log::info!("new board with seed {}", seed);
                self.board = Some(board);
                self.load_error = None;
                self.commit();
            }
            Err(err) => {
                log::debug!("cannot create board: {}", err);
                self.load_error = Some(err.to_string());
            }
        }
        true
    }

    fn view_grid(&self, ctx: &Context<Self>, board: &BoardState) -> Html {
        let callback = ctx.link().callback(|msg: Msg| msg);
        let cells: Vec<_> = board.cells().collect();

        html! {
            <table class={board.has_bingo().then_some("bingo")}>
                {
                    for cells.chunks(bingolink_core::BOARD_SIDE).map(|row| html! {
                        <tr>
                            {
                                for row.iter().map(|&cell| {
                                    let position = cell.position();
                                    let marked = cell.is_marked();
                                    let text = match cell {
                                        Cell::Free => None,
                                        Cell::Content { text, .. } => Some(AttrValue::from(text.to_string())),
                                    };
                                    let callback = callback.clone();
                                    html! {
                                        <CellView {position} {text} {marked} {callback}/>
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn view_editor(&self, ctx: &Context<Self>) -> Html {
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            Msg::UpdateDraft(input.value())
        });
        let onclick = ctx.link().callback(|_: MouseEvent| Msg::CreateBoard);
        let status = draft_status(parse_draft(&self.draft).len());

        html! {
            <section class="editor">
                <textarea rows="24" value={self.draft.clone()} {oninput}
                    placeholder="One entry per line"/>
                <footer>
                    <small>{status.unwrap_or_default()}</small>
                    if let Some(err) = &self.load_error {
                        <small class="error">{err.clone()}</small>
                    }
                    <button {onclick}>{"Create board"}</button>
                </footer>
            </section>
        }
    }
}

impl Component for BoardView {
    type Message = Msg;
    type Properties = BoardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let store = UrlStore;
        let forced_seed = ctx.props().seed;
        let seed = forced_seed.unwrap_or_else(js_random_seed);

        let (board, load_error) = match BoardState::load(&store, seed) {
            Ok(board) => (Some(board), None),
            Err(LoadError::Missing) => (None, None),
            Err(err) => {
                log::warn!("discarding board from url: {}", err);
                (None, Some(err.to_string()))
            }
        };

        // a board restored from the url already used up the forced seed
        let seeds = SeedSource::new(forced_seed.filter(|_| board.is_none()));

        Self {
            store,
            board,
            draft: String::new(),
            load_error,
            shared: None,
            seeds,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Toggle(position) => {
                let Some(board) = &mut self.board else {
                    return false;
                };
                let updated = board.toggle(position);
                if updated {
                    log::debug!("toggled cell {}", position);
                    self.commit();
                }
                updated
            }
            Shuffle => {
                let seed = self.seeds.next();
                let Some(board) = &mut self.board else {
                    return false;
                };
                match BoardState::new(board.content().to_vec(), seed) {
                    Ok(next) => *board = next,
                    Err(err) => log::error!("Could not reshuffle board: {}", err),
                }
                self.commit();
                true
            }
            Edit => {
                if let Some(board) = self.board.take() {
                    self.draft = format_draft(board.content());
                }
                self.shared = None;
                self.commit();
                true
            }
            UpdateDraft(draft) => {
                self.draft = draft;
                true
            }
            CreateBoard => self.create_board(),
            Share => {
                let Some(href) = UrlStore::current_href() else {
                    return false;
                };
                ctx.link()
                    .send_future(async move { Shared(copy_text(&href).await) });
                false
            }
            Shared(copied) => {
                self.shared = Some(copied);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let Some(board) = &self.board else {
            return html! {
                <div class="bingolink">{self.view_editor(ctx)}</div>
            };
        };

        let cb_shuffle = ctx.link().callback(|_: MouseEvent| Shuffle);
        let cb_edit = ctx.link().callback(|_: MouseEvent| Edit);
        let cb_share = ctx.link().callback(|_: MouseEvent| Share);
        let shared = match self.shared {
            None => "",
            Some(true) => "Link copied",
            Some(false) => "Copy failed",
        };

        html! {
            <div class="bingolink">
                {self.view_grid(ctx, board)}
                <nav>
                    <button onclick={cb_shuffle}>{"Shuffle"}</button>
                    <button onclick={cb_edit}>{"Edit"}</button>
                    <button onclick={cb_share}>{"Share"}</button>
                    <small>{shared}</small>
                </nav>
            </div>
        }
    }
}
