// Big-integer limb codec and circuit input construction
pub mod inputs;
pub mod words;

pub use inputs::{
    build_register_inputs, CircuitInput, CircuitInputMap, CircuitVariant, InputError, InputOptions,
};
pub use words::{
    bytes_to_biguint, join_words, split_to_words, CodecError, RSA_LIMB_BITS, RSA_LIMB_COUNT,
};
