//! Tournament participation and game moves.

use peerplays_types::object_id::{tag, Id};
use peerplays_types::{AssetAmount, GameSpecificMove};

define_operation! {
    TournamentJoin {
        payer_account_id: Id<tag::Account>,
        player_account_id: Id<tag::Account>,
        tournament_id: Id<tag::Tournament>,
        buy_in: AssetAmount,
    }
}

define_operation! {
    TournamentLeave {
        canceling_account_id: Id<tag::Account>,
        player_account_id: Id<tag::Account>,
        tournament_id: Id<tag::Tournament>,
    }
}

define_operation! {
    GameMove {
        game_id: Id<tag::Game>,
        player_account_id: Id<tag::Account>,
        #[doc = "A rock-paper-scissors commit or reveal."]
        r#move: GameSpecificMove,
    }
}
