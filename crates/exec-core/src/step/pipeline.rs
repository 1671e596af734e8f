use super::{Step, StepResult};

/// Composición de dos steps: la salida de `first` alimenta a `second`.
///
/// La restricción `B: Step<Input = A::Output>` comprueba en compilación que
/// los contextos encajan, así que el orden de la cadena queda fijado al
/// construirla.
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Step for Chain<A, B>
    where A: Step,
          B: Step<Input = A::Output>
{
    type Input = A::Input;
    type Output = B::Output;

    fn execute(&self, context: A::Input) -> StepResult<B::Output> {
        match self.first.execute(context) {
            StepResult::Continue(next) => self.second.execute(next),
            StepResult::Finished(result) => StepResult::Finished(result),
        }
    }
}

/// Builder tipado de cadenas de steps.
///
/// Uso:
///   let chain = StepChain::new(IdentifyStep::new(history))
///       .then(LoadExecutionStateStep)
///       .then(FingerprintInputsStep)
///       .build();
pub struct StepChain<S: Step> {
    step: S,
}

impl<S: Step> StepChain<S> {
    pub fn new(step: S) -> Self {
        Self { step }
    }

    /// Agrega `next`, exigiendo `N::Input == S::Output`.
    pub fn then<N>(self, next: N) -> StepChain<Chain<S, N>>
        where N: Step<Input = S::Output>
    {
        StepChain { step: Chain { first: self.step,
                                  second: next } }
    }

    pub fn build(self) -> S {
        self.step
    }
}
