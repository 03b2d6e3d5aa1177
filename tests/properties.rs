use proptest::prelude::*;
use sevens_rs::agents::{BotAgent, BotProfile, PlayerAgent, Strategy as BotStrategy};
use sevens_rs::cards::Suit;
use sevens_rs::game::{GameEvent, GameState, DECK_SIZE, PLAYERS};
use sevens_rs::runs::{is_valid_play, valid_plays};

fn any_strategy() -> impl Strategy<Value = BotStrategy> {
    prop_oneof![Just(BotStrategy::Random), Just(BotStrategy::Heuristic)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bot_games_keep_every_invariant(
        seed in any::<u64>(),
        strategies in proptest::array::uniform4(any_strategy()),
    ) {
        let mut state = GameState::initialize_seeded(seed).unwrap();
        let mut bots: Vec<BotAgent> = strategies
            .iter()
            .enumerate()
            .map(|(i, &s)| BotAgent::new(BotProfile::for_strategy(s).with_seed(seed ^ i as u64)))
            .collect();

        let mut turns = 0;
        while !state.is_over() {
            let seat = state.current_player();
            let hand = state.hand(seat).unwrap().to_vec();
            let event = bots[seat].decide(seat, &hand, state.runs()).unwrap();
            match event {
                GameEvent::PlayCard { card, .. } => prop_assert!(is_valid_play(card, state.runs())),
                GameEvent::PassTurn { .. } => prop_assert!(valid_plays(&hand, state.runs()).is_empty()),
            }
            let before = state.card_count();
            state = state.apply_strict(event).unwrap();

            prop_assert_eq!(state.card_count(), before);
            prop_assert_eq!(state.card_count(), DECK_SIZE);
            prop_assert!(state.is_conserved());
            prop_assert_eq!(state.current_player(), (seat + 1) % PLAYERS);
            for suit in Suit::ALL {
                let run = state.runs().get(suit);
                prop_assert!(run.is_contiguous());
                if !run.is_empty() {
                    prop_assert!(run.as_slice().iter().any(|c| c.is_seven()));
                }
            }
            turns += 1;
            prop_assert!(turns <= 52 * PLAYERS, "game did not finish");
        }

        let winner = state.winner().unwrap();
        prop_assert!(state.hand(winner).unwrap().is_empty());
        prop_assert!(state.players().iter().filter(|h| h.is_empty()).count() == 1);
    }

    #[test]
    fn opening_always_succeeds(seed in any::<u64>()) {
        let state = GameState::initialize_seeded(seed).unwrap();
        let opener = state.current_player();
        let plays = state.valid_plays_for(opener);
        prop_assert!(plays.contains(&sevens_rs::cards::Card::SEVEN_OF_HEARTS));
        let next = state.apply_strict(GameEvent::play(opener, sevens_rs::cards::Card::SEVEN_OF_HEARTS));
        prop_assert!(next.is_ok());
    }
}
