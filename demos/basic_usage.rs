use nft_lending_units::prelude::*;
use rust_decimal::Decimal;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== NFT Lending Units Example ===\n");

    // Pool parameters entered by the owner
    let gate = CallGate::new(1).connected(1, "0xowner").owned_by("0xOWNER");
    let builder = CallBuilder::new(ConversionConfig::default(), gate)?;

    for call in [
        builder.set_ltv("0xpool", "33"),
        builder.set_max_price("0xpool", "0.2"),
        builder.set_max_loan_length("0xpool", "14"),
        builder.change_interest("0xpool", "20", "80", false),
    ] {
        println!(
            "{}({}) enabled={}",
            call.function_name,
            call.args_as_strings().join(", "),
            call.enabled
        );
    }

    // Borrower view
    let one_ether = 1_000_000_000_000_000_000i128;
    let oracle = FixedPoint::from_raw(3 * one_ether);
    let ltv = FixedPoint::from_raw(one_ether * 33 / 100);

    println!("\nQuote per NFT: {}", quote_price(oracle, ltv)?);
    println!(
        "Suggested max price: {}",
        max_price_per_nft(Some(oracle), Some(Decimal::from(33)))?
    );
    println!(
        "NFTs fundable with 10 ETH: {}",
        max_nfts_to_borrow(FixedPoint::from_raw(10 * one_ether), oracle, ltv)?
    );

    let clock = SystemClock;
    let deadline = clock.now_millis() + 3 * 86_400_000;
    println!("Loan deadline: {}", loan_deadline_display(deadline, &clock));
    println!(
        "Repay with buffer: {}",
        payable_with_buffer(FixedPoint::from_raw(one_ether))?
    );
    let repay = builder.repay("0xpool", vec![LoanId::from(12)], FixedPoint::from_raw(one_ether));
    println!(
        "{}({}) value={:?}",
        repay.function_name,
        repay.args_as_strings().join(", "),
        repay.value
    );

    Ok(())
}
