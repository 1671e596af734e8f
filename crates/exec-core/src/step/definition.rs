use super::StepResult;

/// Un stage del pipeline.
///
/// Lee sólo lo que ya está en su contexto de entrada, calcula campos nuevos y
/// devuelve el contexto extendido (`Continue`) o corta la cadena
/// (`Finished`). Los steps no guardan estado entre corridas.
pub trait Step: Send + Sync {
    type Input;
    type Output;

    fn execute(&self, context: Self::Input) -> StepResult<Self::Output>;
}
