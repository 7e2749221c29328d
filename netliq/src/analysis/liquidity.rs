use netliq_core::{Field, NetliqError, Table, rolling_mean};

/// Observations in the net liquidity moving average.
pub const MA_WINDOW: usize = 20;

/// Express a component value in billions of dollars.
fn in_billions(field: Field, v: f64) -> f64 {
    match field.unit().per_billion() {
        Some(divisor) => v / divisor,
        None => v,
    }
}

/// Append net liquidity and its trailing average to `table`.
///
/// Net liquidity is `balance_sheet - reverse_repo - treasury_cash` with every
/// component first expressed in billions. The average is undefined for the
/// first `MA_WINDOW - 1` rows. Existing columns are left untouched.
///
/// # Errors
/// Returns `MissingField` naming every absent macro component, and `Data` if
/// the derived columns are already present.
pub fn with_net_liquidity(table: Table) -> Result<Table, NetliqError> {
    if let Some(f) = table.fields().find(|f| f.is_derived()) {
        return Err(NetliqError::Data(format!("{f} is already derived")));
    }
    let (Some(walcl), Some(rrp), Some(tga)) = (
        table.column(Field::Walcl),
        table.column(Field::Rrp),
        table.column(Field::Tga),
    ) else {
        let missing = Field::MACRO
            .into_iter()
            .filter(|f| !table.contains(*f))
            .collect();
        return Err(NetliqError::missing(missing));
    };

    let net: Vec<Option<f64>> = walcl
        .iter()
        .zip(rrp)
        .zip(tga)
        .map(|((w, r), t)| {
            Some(
                in_billions(Field::Walcl, (*w)?)
                    - in_billions(Field::Rrp, (*r)?)
                    - in_billions(Field::Tga, (*t)?),
            )
        })
        .collect();
    let ma = rolling_mean(&net, MA_WINDOW);

    table
        .with_column(Field::NetLiquidity, net)?
        .with_column(Field::NetLiquidityMa20, ma)
}
