use shared::cancel::CancelToken;
use yew::prelude::*;

/// Token that lives as long as the calling component and is cancelled when
/// it unmounts
#[hook]
pub fn use_cancel_token() -> CancelToken {
    let token = use_memo((), |_| CancelToken::new());

    {
        let token = (*token).clone();
        use_effect_with((), move |_| move || token.cancel());
    }

    (*token).clone()
}
